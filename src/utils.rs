use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValueError;

pub static EMPTY_CONTENT_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

static _VALID_IP_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.){3}\d+$").expect("valid regex"));

static _VALID_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("valid regex"));

pub static _VALID_ENDPOINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-.]+(:\d+)?$").expect("valid regex"));

/// Check whether bucket name is valid
pub fn check_bucket_name(name: &str) -> Result<(), ValueError> {
    if name.len() < 3 || name.len() > 63 {
        return Err(ValueError::from(
            "Bucket name must be between 3 (min) and 63 (max) characters long.",
        ));
    };
    if !_VALID_NAME.is_match(name) {
        return Err(ValueError::from(
            "Bucket name can consist only of lowercase letters, numbers, dots (.), and hyphens (-). must begin and end with a letter or number.",
        ));
    }
    if name.contains("..") || name.contains(".-") || name.contains("-.") {
        return Err(ValueError::from(
            "Bucket name cannot contain two adjacent periods, or a period adjacent to a hyphen.",
        ));
    };
    if name.starts_with("xn--") {
        return Err(ValueError::from(
            "Bucket name cannot start with the prefix xn--.",
        ));
    }
    if name.ends_with("-s3alias") {
        return Err(ValueError::from(
            "Bucket name cannot end with the suffix -s3alias.",
        ));
    }
    if _VALID_IP_ADDRESS.is_match(name) {
        return Err(ValueError::from("Bucket name cannot be an ip address"));
    };
    Ok(())
}

/// Encode arbitrary octets as base64 using the provided [base64::engine::general_purpose::STANDARD].
/// Returns a `String`.
#[inline]
pub fn base64_encode<T: AsRef<[u8]>>(input: T) -> String {
    base64::engine::general_purpose::STANDARD.encode(input)
}

/// Compute MD5 of data and return hash as Base64 encoded value.
pub fn md5sum_hash(data: &[u8]) -> String {
    base64_encode(md5::compute(data).0)
}

/// uri encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
#[inline]
pub fn urlencode(data: &str, safe_slash: bool) -> String {
    let s = urlencoding::encode(data).into_owned();
    if safe_slash {
        s.replace("%2F", "/")
    } else {
        s
    }
}

pub fn trim_bytes(b: &[u8]) -> &[u8] {
    let start = b.iter().position(|c| !c.is_ascii_whitespace());
    let end = b.iter().rposition(|c| !c.is_ascii_whitespace());
    match (start, end) {
        (Some(start), Some(end)) => &b[start..=end],
        _ => &b[0..0],
    }
}

#[cfg(test)]
mod tests {
    use super::{base64_encode, check_bucket_name, md5sum_hash, trim_bytes, urlencode};

    #[test]
    fn test_check_bucket_name() {
        assert!(check_bucket_name("test").is_ok());
        assert!(check_bucket_name("te").is_err());
        assert!(check_bucket_name("Test").is_err());
        assert!(check_bucket_name("test..t").is_err());
        assert!(check_bucket_name("test-.d").is_err());
        assert!(check_bucket_name("xn--test").is_err());
        assert!(check_bucket_name("test-s3alias").is_err());
        assert!(check_bucket_name("127.0.0.1").is_err());
    }

    #[test]
    fn test_urlencode() {
        assert_eq!(urlencode("dir/file name.txt", true), "dir/file%20name.txt");
        assert_eq!(urlencode("dir/file", false), "dir%2Ffile");
        assert_eq!(urlencode("a-b_c.d~e", false), "a-b_c.d~e");
    }

    #[test]
    fn test_encodings() {
        assert_eq!(base64_encode("hello"), "aGVsbG8=");
        assert_eq!(md5sum_hash(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn test_trim_bytes() {
        assert_eq!(trim_bytes(" hello \n".as_bytes()), "hello".as_bytes());
        assert_eq!(trim_bytes("   ".as_bytes()), "".as_bytes());
        assert_eq!(trim_bytes("a  b".as_bytes()), "a  b".as_bytes());
    }
}
