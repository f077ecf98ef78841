//! Package URLs for generated dependency metadata

use std::fmt::Write;

/// Builds a generic package URL for a dependency
///
/// `checksum` and `source` become the `checksum` and `download_url`
/// qualifiers. An empty checksum is left out.
pub fn generate_purl(name: &str, version: &str, checksum: &str, source: &str) -> String {
    let mut purl = format!(
        "pkg:generic/{}@{}",
        percent_encode(name),
        percent_encode(version)
    );

    let mut qualifiers = Vec::new();
    if !checksum.is_empty() {
        qualifiers.push(format!("checksum={}", percent_encode(checksum)));
    }
    qualifiers.push(format!("download_url={}", percent_encode(source)));

    purl.push('?');
    purl.push_str(&qualifiers.join("&"));
    purl
}

/// Percent-encodes everything outside the RFC 3986 unreserved set
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}
