use hyper::HeaderMap;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;
use std::str::FromStr;

use super::{ChecksumAlgorithm, RequestCharged, ServerSideEncryption};
use crate::error::XmlError;
use crate::header::*;
use crate::time::UtcTime;

/// Children of `<InitiateMultipartUploadResult>` read into the result.
#[derive(Debug, Clone, Copy)]
enum BodyField {
    Bucket,
    Key,
    UploadId,
}

impl BodyField {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"Bucket" => Some(Self::Bucket),
            b"Key" => Some(Self::Key),
            b"UploadId" => Some(Self::UploadId),
            _ => None,
        }
    }
}

/// Response of the `create_multipart_upload` API.
///
/// Built from the XML body and the response headers. Every field is
/// independent; a field whose source is missing stays `None`.
#[derive(Clone, Default, PartialEq)]
pub struct CreateMultipartUploadResult {
    bucket: Option<String>,
    key: Option<String>,
    upload_id: Option<String>,
    abort_date: Option<UtcTime>,
    abort_rule_id: Option<String>,
    server_side_encryption: Option<ServerSideEncryption>,
    sse_customer_algorithm: Option<String>,
    sse_customer_key_md5: Option<String>,
    sse_kms_key_id: Option<String>,
    sse_kms_encryption_context: Option<String>,
    bucket_key_enabled: Option<bool>,
    request_charged: Option<RequestCharged>,
    checksum_algorithm: Option<ChecksumAlgorithm>,
}

impl CreateMultipartUploadResult {
    /// Build the result from the response headers and XML body.
    ///
    /// An empty body leaves `bucket`, `key` and `upload_id` unset;
    /// a body that is not XML returns [XmlError].
    pub fn from_response(headers: &HeaderMap, body: &[u8]) -> Result<Self, XmlError> {
        let mut result: Self = body.try_into()?;
        result.merge_headers(headers);
        Ok(result)
    }

    /// Build the result from the response headers only.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut result = Self::default();
        result.merge_headers(headers);
        result
    }

    fn body_slot(&mut self, field: BodyField) -> &mut Option<String> {
        match field {
            BodyField::Bucket => &mut self.bucket,
            BodyField::Key => &mut self.key,
            BodyField::UploadId => &mut self.upload_id,
        }
    }

    fn merge_headers(&mut self, headers: &HeaderMap) {
        if let Some(date) = header_str(headers, X_AMZ_ABORT_DATE) {
            self.abort_date = UtcTime::parse_rfc822(date);
            if self.abort_date.is_none() {
                log::warn!("ignore invalid {X_AMZ_ABORT_DATE} header: {date}");
            }
        }
        if let Some(v) = header_string(headers, X_AMZ_ABORT_RULE_ID) {
            self.abort_rule_id = Some(v);
        }
        if let Some(v) = parse_header(headers, X_AMZ_SERVER_SIDE_ENCRYPTION) {
            self.server_side_encryption = Some(v);
        }
        if let Some(v) = header_string(headers, X_AMZ_SERVER_SIDE_ENCRYPTION_CUSTOMER_ALGORITHM) {
            self.sse_customer_algorithm = Some(v);
        }
        if let Some(v) = header_string(headers, X_AMZ_SERVER_SIDE_ENCRYPTION_CUSTOMER_KEY_MD5) {
            self.sse_customer_key_md5 = Some(v);
        }
        if let Some(v) = header_string(headers, X_AMZ_SERVER_SIDE_ENCRYPTION_AWS_KMS_KEY_ID) {
            self.sse_kms_key_id = Some(v);
        }
        if let Some(v) = header_string(headers, X_AMZ_SERVER_SIDE_ENCRYPTION_CONTEXT) {
            self.sse_kms_encryption_context = Some(v);
        }
        if let Some(v) = parse_header(headers, X_AMZ_SERVER_SIDE_ENCRYPTION_BUCKET_KEY_ENABLED) {
            self.bucket_key_enabled = Some(v);
        }
        if let Some(v) = parse_header(headers, X_AMZ_REQUEST_CHARGED) {
            self.request_charged = Some(v);
        }
        if let Some(v) = parse_header(headers, X_AMZ_CHECKSUM_ALGORITHM) {
            self.checksum_algorithm = Some(v);
        }
    }

    /// The name of the bucket to which the multipart upload was initiated.
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    /// Object key for which the multipart upload was initiated.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// ID for the initiated multipart upload.
    pub fn upload_id(&self) -> Option<&str> {
        self.upload_id.as_deref()
    }

    /// The date when the upload becomes eligible for an abort operation,
    /// if the bucket has a lifecycle rule that aborts incomplete multipart uploads.
    pub fn abort_date(&self) -> Option<&UtcTime> {
        self.abort_date.as_ref()
    }

    /// ID of the lifecycle rule that applies the abort action, paired with [`Self::abort_date`].
    pub fn abort_rule_id(&self) -> Option<&str> {
        self.abort_rule_id.as_deref()
    }

    pub fn server_side_encryption(&self) -> Option<ServerSideEncryption> {
        self.server_side_encryption
    }

    /// The encryption algorithm confirmed for SSE-C.
    pub fn sse_customer_algorithm(&self) -> Option<&str> {
        self.sse_customer_algorithm.as_deref()
    }

    /// The base64 MD5 of the SSE-C key, for round-trip message integrity.
    pub fn sse_customer_key_md5(&self) -> Option<&str> {
        self.sse_customer_key_md5.as_deref()
    }

    pub fn sse_kms_key_id(&self) -> Option<&str> {
        self.sse_kms_key_id.as_deref()
    }

    /// Base64 encoded JSON with the encryption context key-value pairs.
    pub fn sse_kms_encryption_context(&self) -> Option<&str> {
        self.sse_kms_encryption_context.as_deref()
    }

    pub fn bucket_key_enabled(&self) -> Option<bool> {
        self.bucket_key_enabled
    }

    pub fn request_charged(&self) -> Option<RequestCharged> {
        self.request_charged
    }

    pub fn checksum_algorithm(&self) -> Option<ChecksumAlgorithm> {
        self.checksum_algorithm
    }
}

impl fmt::Debug for CreateMultipartUploadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "*** Sensitive Data Redacted ***");
        f.debug_struct("CreateMultipartUploadResult")
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("upload_id", &self.upload_id)
            .field("abort_date", &self.abort_date)
            .field("abort_rule_id", &self.abort_rule_id)
            .field("server_side_encryption", &self.server_side_encryption)
            .field("sse_customer_algorithm", &self.sse_customer_algorithm)
            .field("sse_customer_key_md5", &self.sse_customer_key_md5)
            .field("sse_kms_key_id", &redacted(&self.sse_kms_key_id))
            .field(
                "sse_kms_encryption_context",
                &redacted(&self.sse_kms_encryption_context),
            )
            .field("bucket_key_enabled", &self.bucket_key_enabled)
            .field("request_charged", &self.request_charged)
            .field("checksum_algorithm", &self.checksum_algorithm)
            .finish()
    }
}

/// Reads the first `Bucket`, `Key` and `UploadId` children of the root element.
///
/// Only the direct text of those children is kept; nested elements,
/// repeated and unknown children are skipped.
impl TryFrom<&[u8]> for CreateMultipartUploadResult {
    type Error = XmlError;

    fn try_from(body: &[u8]) -> Result<Self, Self::Error> {
        let mut result = Self::default();
        let mut reader = Reader::from_reader(body);
        reader.trim_text(true);
        let mut depth = 0usize;
        let mut has_root = false;
        let mut current: Option<(BodyField, String)> = None;
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if depth == 0 {
                        if has_root {
                            return Err(XmlError::new("multiple root elements"));
                        }
                        has_root = true;
                    } else if depth == 1 {
                        current = BodyField::from_name(e.local_name().as_ref())
                            .filter(|f| result.body_slot(*f).is_none())
                            .map(|f| (f, String::new()));
                    }
                    depth += 1;
                }
                Event::Empty(e) => {
                    if depth == 0 {
                        if has_root {
                            return Err(XmlError::new("multiple root elements"));
                        }
                        has_root = true;
                    } else if depth == 1 {
                        if let Some(f) = BodyField::from_name(e.local_name().as_ref()) {
                            result.body_slot(f).get_or_insert_with(String::new);
                        }
                    }
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == 1 {
                        if let Some((f, text)) = current.take() {
                            *result.body_slot(f) = Some(text.trim().to_owned());
                        }
                    }
                }
                Event::Text(e) => {
                    if depth == 0 {
                        return Err(XmlError::new("text outside of the root element"));
                    }
                    if let (2, Some((_, text))) = (depth, current.as_mut()) {
                        text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let (2, Some((_, text))) = (depth, current.as_mut()) {
                        text.push_str(&reader.decoder().decode(&e)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if depth != 0 {
            return Err(XmlError::new("unexpected end of document"));
        }
        Ok(result)
    }
}

impl TryFrom<&str> for CreateMultipartUploadResult {
    type Error = XmlError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.as_bytes().try_into()
    }
}

/// Value of a header, if present and visible ASCII.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let value = headers.get(name)?;
    match value.to_str() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignore non-ascii {name} header");
            None
        }
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name).map(ToOwned::to_owned)
}

fn parse_header<T>(headers: &HeaderMap, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = header_str(headers, name)?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignore invalid {name} header: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use hyper::header::{HeaderName, HeaderValue};
    use hyper::HeaderMap;

    use super::CreateMultipartUploadResult;
    use crate::datatype::{ChecksumAlgorithm, RequestCharged, ServerSideEncryption};
    use crate::error::XmlError;
    use crate::time::UtcTime;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
    <InitiateMultipartUploadResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
    <Bucket>file</Bucket><Key>test.txt</Key>
    <UploadId>b3621cce-9a4c-4c0e-8666-c701b8255163</UploadId>
    </InitiateMultipartUploadResult>
    "#;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (k, v) in pairs {
            headers.insert(*k, HeaderValue::from_static(*v));
        }
        headers
    }

    #[test]
    fn test_from_response() {
        let headers = headers(&[
            ("x-amz-abort-date", "Wed, 28 Oct 2020 00:00:00 GMT"),
            ("x-amz-abort-rule-id", "abort-after-7-days"),
            ("x-amz-server-side-encryption", "aws:kms"),
            ("x-amz-server-side-encryption-aws-kms-key-id", "arn:aws:kms:key/1234"),
            ("x-amz-server-side-encryption-context", "eyJhIjoiYiJ9"),
            ("x-amz-server-side-encryption-bucket-key-enabled", "true"),
            ("x-amz-request-charged", "requester"),
            ("x-amz-checksum-algorithm", "SHA256"),
        ]);
        let result = CreateMultipartUploadResult::from_response(&headers, BODY.as_bytes()).unwrap();
        assert_eq!(result.bucket(), Some("file"));
        assert_eq!(result.key(), Some("test.txt"));
        assert_eq!(
            result.upload_id(),
            Some("b3621cce-9a4c-4c0e-8666-c701b8255163")
        );
        assert_eq!(
            result.abort_date(),
            Some(&UtcTime::new(
                Utc.with_ymd_and_hms(2020, 10, 28, 0, 0, 0).unwrap()
            ))
        );
        assert_eq!(result.abort_rule_id(), Some("abort-after-7-days"));
        assert_eq!(
            result.server_side_encryption(),
            Some(ServerSideEncryption::AwsKms)
        );
        assert_eq!(result.sse_kms_key_id(), Some("arn:aws:kms:key/1234"));
        assert_eq!(result.sse_kms_encryption_context(), Some("eyJhIjoiYiJ9"));
        assert_eq!(result.bucket_key_enabled(), Some(true));
        assert_eq!(result.request_charged(), Some(RequestCharged::Requester));
        assert_eq!(result.checksum_algorithm(), Some(ChecksumAlgorithm::SHA256));
        assert_eq!(result.sse_customer_algorithm(), None);
        assert_eq!(result.sse_customer_key_md5(), None);
    }

    #[test]
    fn test_ssec_headers() {
        let headers = headers(&[
            ("x-amz-server-side-encryption-customer-algorithm", "AES256"),
            (
                "x-amz-server-side-encryption-customer-key-md5",
                "ZjQrne1X/iTcskbY2m3tFg==",
            ),
        ]);
        let result = CreateMultipartUploadResult::from_headers(&headers);
        assert_eq!(result.sse_customer_algorithm(), Some("AES256"));
        assert_eq!(result.sse_customer_key_md5(), Some("ZjQrne1X/iTcskbY2m3tFg=="));
        assert_eq!(result.server_side_encryption(), None);
        assert_eq!(result.bucket(), None);
    }

    #[test]
    fn test_no_headers() {
        let result =
            CreateMultipartUploadResult::from_response(&HeaderMap::new(), BODY.as_bytes()).unwrap();
        assert_eq!(result.bucket(), Some("file"));
        assert_eq!(result.abort_date(), None);
        assert_eq!(result.abort_rule_id(), None);
        assert_eq!(result.server_side_encryption(), None);
        assert_eq!(result.request_charged(), None);
        assert_eq!(result.bucket_key_enabled(), None);
    }

    #[test]
    fn test_empty_body() {
        let headers = headers(&[("x-amz-abort-rule-id", "rule-1")]);
        let result = CreateMultipartUploadResult::from_response(&headers, b"  \n").unwrap();
        assert_eq!(result.bucket(), None);
        assert_eq!(result.key(), None);
        assert_eq!(result.upload_id(), None);
        assert_eq!(result.abort_rule_id(), Some("rule-1"));
        assert_eq!(
            CreateMultipartUploadResult::from_response(&HeaderMap::new(), b"").unwrap(),
            CreateMultipartUploadResult::default()
        );
    }

    #[test]
    fn test_partial_body() {
        let res = "<InitiateMultipartUploadResult><UploadId>\n  abc  \n</UploadId></InitiateMultipartUploadResult>";
        let result: CreateMultipartUploadResult = res.try_into().unwrap();
        assert_eq!(result.bucket(), None);
        assert_eq!(result.key(), None);
        assert_eq!(result.upload_id(), Some("abc"));
    }

    #[test]
    fn test_unknown_elements() {
        let res = r#"<InitiateMultipartUploadResult>
            <Bucket>bucket</Bucket>
            <ChecksumAlgorithm>CRC32</ChecksumAlgorithm>
            <Key>dir/a.txt</Key>
            <UploadId>id</UploadId>
        </InitiateMultipartUploadResult>"#;
        let result: CreateMultipartUploadResult = res.try_into().unwrap();
        assert_eq!(result.bucket(), Some("bucket"));
        assert_eq!(result.key(), Some("dir/a.txt"));
        assert_eq!(result.upload_id(), Some("id"));
    }

    #[test]
    fn test_repeated_elements() {
        let res = "<InitiateMultipartUploadResult><Bucket>first</Bucket><Bucket>second</Bucket><UploadId>id</UploadId></InitiateMultipartUploadResult>";
        let result: CreateMultipartUploadResult = res.try_into().unwrap();
        assert_eq!(result.bucket(), Some("first"));
        assert_eq!(result.upload_id(), Some("id"));

        let res = "<InitiateMultipartUploadResult><Bucket>a</Bucket><Key>k</Key><Bucket>b</Bucket><UploadId>u</UploadId></InitiateMultipartUploadResult>";
        let result: CreateMultipartUploadResult = res.try_into().unwrap();
        assert_eq!(result.bucket(), Some("a"));
        assert_eq!(result.key(), Some("k"));
        assert_eq!(result.upload_id(), Some("u"));
    }

    #[test]
    fn test_nested_elements() {
        let res = "<InitiateMultipartUploadResult><Bucket><Name>n</Name></Bucket><UploadId>u</UploadId></InitiateMultipartUploadResult>";
        let result: CreateMultipartUploadResult = res.try_into().unwrap();
        assert_eq!(result.bucket(), Some(""));
        assert_eq!(result.upload_id(), Some("u"));

        let res = "<InitiateMultipartUploadResult><Owner><UploadId>inner</UploadId></Owner><Key/><UploadId><![CDATA[ cdata-id ]]></UploadId></InitiateMultipartUploadResult>";
        let result: CreateMultipartUploadResult = res.try_into().unwrap();
        assert_eq!(result.bucket(), None);
        assert_eq!(result.key(), Some(""));
        assert_eq!(result.upload_id(), Some("cdata-id"));
    }

    #[test]
    fn test_escaped_text() {
        let res = "<InitiateMultipartUploadResult><Key>a&amp;b.txt</Key></InitiateMultipartUploadResult>";
        let result: CreateMultipartUploadResult = res.try_into().unwrap();
        assert_eq!(result.key(), Some("a&b.txt"));
    }

    #[test]
    fn test_malformed_body() {
        let result: Result<CreateMultipartUploadResult, XmlError> =
            "<InitiateMultipartUploadResult><Bucket>file</Key>".try_into();
        assert!(result.is_err());
        let result: Result<CreateMultipartUploadResult, XmlError> =
            "<InitiateMultipartUploadResult><Bucket>file</Bucket>".try_into();
        assert!(result.is_err());
        let result: Result<CreateMultipartUploadResult, XmlError> =
            "Service Unavailable".try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_header_values() {
        let mut headers = headers(&[
            ("x-amz-abort-date", "2020-10-28T00:00:00Z"),
            ("x-amz-server-side-encryption", "rot13"),
            ("x-amz-request-charged", "owner"),
            ("x-amz-server-side-encryption-bucket-key-enabled", "yes"),
        ]);
        headers.insert(
            "x-amz-abort-rule-id",
            HeaderValue::from_bytes("r\u{e8}gle".as_bytes()).unwrap(),
        );
        let result = CreateMultipartUploadResult::from_headers(&headers);
        assert_eq!(result, CreateMultipartUploadResult::default());
    }

    #[test]
    fn test_header_name_case() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-Amz-Abort-Rule-Id").unwrap(),
            HeaderValue::from_static("rule-2"),
        );
        headers.insert(
            HeaderName::from_bytes(b"X-Amz-Server-Side-Encryption").unwrap(),
            HeaderValue::from_static("AES256"),
        );
        let result = CreateMultipartUploadResult::from_headers(&headers);
        assert_eq!(result.abort_rule_id(), Some("rule-2"));
        assert_eq!(
            result.server_side_encryption(),
            Some(ServerSideEncryption::Aes256)
        );
    }

    #[test]
    fn test_debug_redacts_kms() {
        let headers = headers(&[
            ("x-amz-server-side-encryption-aws-kms-key-id", "secret-key-id"),
            ("x-amz-server-side-encryption-context", "secret-context"),
        ]);
        let result = CreateMultipartUploadResult::from_headers(&headers);
        let debug = format!("{:?}", result);
        assert!(!debug.contains("secret-key-id"));
        assert!(!debug.contains("secret-context"));
        assert!(debug.contains("Sensitive Data Redacted"));
    }
}
