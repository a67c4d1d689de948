use crate::foundation::clock::{Clock, ManualClock};
use crate::foundation::types::*;
use crate::tests::*;

#[test]
fn test_address_hex_display_and_parse() {
    let hex = alice().to_string();
    assert_eq!(hex.len(), 40);
    assert!(hex.starts_with("aa"));
    assert_eq!(hex.parse::<Address>().unwrap(), alice());
    assert_eq!(format!("0x{hex}").parse::<Address>().unwrap(), alice());
}

#[test]
fn test_address_parse_wrong_length() {
    assert!("aabb".parse::<Address>().is_err());
    assert!("zz".repeat(20).parse::<Address>().is_err());
}

#[test]
fn test_address_serde_as_hex_string() {
    let json = serde_json::to_string(&bob()).unwrap();
    assert_eq!(json, format!("\"{}\"", bob()));
    let back: Address = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bob());
}

#[test]
fn test_salt_from_nonce() {
    let salt = Salt::from(0x0102u64);
    assert_eq!(salt.0[31], 0x02);
    assert_eq!(salt.0[30], 0x01);
    assert!(salt.0[..24].iter().all(|&b| b == 0));
    assert!(Salt::from(0u64).is_zero());
}

#[test]
fn test_call_data_serialized_as_hex() {
    let call = Call::new(target(), 3, b"hi".to_vec());
    let json = serde_json::to_value(&call).unwrap();
    assert_eq!(json["data"], "6869");
    assert_eq!(json["value"], 3);
}

#[test]
fn test_manual_clock_never_goes_back() {
    let clock = ManualClock::new(100);
    clock.advance(5);
    assert_eq!(clock.now(), 105);
    clock.set(50);
    assert_eq!(clock.now(), 105);
    clock.set(200);
    assert_eq!(clock.now(), 200);
}

#[test]
fn test_call_context_at_clock() {
    let clock = ManualClock::new(START);
    let ctx = CallContext::at(bob(), &clock);
    assert_eq!(ctx.sender, bob());
    assert_eq!(ctx.timestamp, START);
}
