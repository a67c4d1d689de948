//! Snapshot data format: semicolon-delimited key=value store.
//!
//! Controller state is persisted as:
//!   "min_delay=5;op_count=1;op_0=<id>:<timestamp>;member_count=1;member_0=admin:<addr>"
//!
//! Keys and values never contain `;` or `=`.

/// Find a value for a given key in semicolon-delimited "key=value" data.
///
/// Example: find_value("a=1;b=2;c=3", "b") returns Some("2")
pub fn find_value<'a>(data: &'a str, key: &str) -> Option<&'a str> {
    entries(data).find_map(|(k, v)| (k == key).then_some(v))
}

/// Iterate over well-formed entries. Empty segments and segments without
/// `=` are skipped; use [`malformed_entry`] to detect them.
pub fn entries(data: &str) -> impl Iterator<Item = (&str, &str)> {
    data.split(';')
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| entry.split_once('='))
}

/// First non-empty segment that is not a `key=value` pair, if any.
pub fn malformed_entry(data: &str) -> Option<&str> {
    data.split(';')
        .filter(|entry| !entry.is_empty())
        .find(|entry| !entry.contains('='))
}

/// Build a key like "op_0", "member_12".
pub fn build_indexed_key(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}

/// Append a key=value pair, inserting the separator when needed.
pub fn write_entry(data: &mut String, key: &str, value: &str) {
    if !data.is_empty() {
        data.push(';');
    }
    data.push_str(key);
    data.push('=');
    data.push_str(value);
}
