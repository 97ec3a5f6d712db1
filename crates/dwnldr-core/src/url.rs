//! Download URL construction

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is by browsers' `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single path component (a file name)
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Ensure a base path ends with `/`
pub fn normalize_base(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

/// Build the URL a remote machine uses to download `filename`.
///
/// Returns an empty string when either the IP or the file name is empty. The
/// `:port` segment is omitted for port `80` or an empty port.
pub fn build_url(ip: &str, port: &str, base: &str, filename: &str) -> String {
    if ip.is_empty() || filename.is_empty() {
        return String::new();
    }

    let port_segment = if port.is_empty() || port == "80" {
        String::new()
    } else {
        format!(":{}", port)
    };

    format!(
        "http://{}{}{}{}",
        ip,
        port_segment,
        normalize_base(base),
        encode_component(filename)
    )
}
