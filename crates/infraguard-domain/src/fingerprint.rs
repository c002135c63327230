use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for one result.
///
/// Identity fields:
/// - rule long id
/// - status
/// - source filename (repo-relative)
/// - start line
/// - logical reference of the flagged value
/// - description (names the resource when the value carries no source location)
pub fn fingerprint_for_result(
    rule_id: &str,
    status: &str,
    filename: &str,
    start_line: u32,
    reference: &str,
    description: &str,
) -> String {
    let line = start_line.to_string();
    let canonical = [rule_id, status, filename, line.as_str(), reference, description].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
