//! Deterministic operation ids.
//!
//! Mirrors OpenZeppelin's
//! `keccak256(abi.encode(target, value, data, predecessor, salt))` with
//! SHA-256 over a canonical, length-prefixed encoding. Single operations
//! and batches use distinct domain tags, so a one-call batch never shares
//! an id with the equivalent single operation.

use sha2::{Digest, Sha256};

use crate::foundation::types::{Address, Call, OperationId, Salt};

const OPERATION_DOMAIN: &[u8] = b"knowledger.timelock.operation.v1";
const BATCH_DOMAIN: &[u8] = b"knowledger.timelock.batch.v1";

/// Id of a single-call operation. Mirrors `hashOperation()`.
pub fn hash_operation(
    target: &Address,
    value: u64,
    data: &[u8],
    predecessor: &OperationId,
    salt: &Salt,
) -> OperationId {
    let mut hasher = Sha256::new();
    hasher.update(OPERATION_DOMAIN);
    update_call(&mut hasher, target, value, data);
    hasher.update(predecessor.as_bytes());
    hasher.update(salt.as_bytes());
    OperationId(hasher.finalize().into())
}

/// Id of a batch. Mirrors `hashOperationBatch()`.
pub fn hash_operation_batch(calls: &[Call], predecessor: &OperationId, salt: &Salt) -> OperationId {
    let mut hasher = Sha256::new();
    hasher.update(BATCH_DOMAIN);
    hasher.update((calls.len() as u64).to_be_bytes());
    for call in calls {
        update_call(&mut hasher, &call.target, call.value, &call.data);
    }
    hasher.update(predecessor.as_bytes());
    hasher.update(salt.as_bytes());
    OperationId(hasher.finalize().into())
}

fn update_call(hasher: &mut Sha256, target: &Address, value: u64, data: &[u8]) {
    hasher.update(target.as_bytes());
    hasher.update(value.to_be_bytes());
    // Length prefix keeps (data, predecessor) boundaries unambiguous.
    hasher.update((data.len() as u64).to_be_bytes());
    hasher.update(data);
}
