/// The pinned fingerprint record. Line endings are always `\n`.
pub fn fingerprint_record(case: &str, sha256: &str) -> String {
    format!(
        "SSIL CORE CASESET REPLAY OUTPUT HASH\n\
Profile: public\n\
Caseset: {case}\n\
\n\
Expected SHA256 (ssil_out.csv):\n\
{sha256}\n\
\n\
Verification Rule:\n\
B_A = B_B\n\
and\n\
SHA256(ssil_out.csv) must match the expected hash above.\n\
\n\
No tolerance.\n\
No partial acceptance.\n\
Byte identity required.\n"
    )
}

/// First whitespace-separated token, on any line, that is exactly 64 hex
/// digits. Returned lowercased.
pub fn find_expected_hash(text: &str) -> Option<String> {
    text.lines()
        .flat_map(str::split_whitespace)
        .find(|tok| tok.len() == 64 && tok.bytes().all(|b| b.is_ascii_hexdigit()))
        .map(str::to_ascii_lowercase)
}
