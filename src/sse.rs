//! Server-side encryption

use hyper::header::HeaderValue;
use hyper::HeaderMap;

use crate::datatype::ServerSideEncryption;
use crate::error::ValueError;
use crate::header::*;
use crate::utils::{base64_encode, md5sum_hash};

/// Server-side encryption base trait.
pub trait Sse {
    /// Return headers.
    fn headers(&self) -> HeaderMap;

    /// Return TLS required to use this server-side encryption.
    fn tls_required(&self) -> bool {
        true
    }
}

/// Server-side encryption - customer key type.
#[derive(Clone)]
pub struct SseCustomerKey {
    headers: HeaderMap,
}

impl SseCustomerKey {
    /// `key` is the raw 256 bit key.
    pub fn new(key: &str) -> Result<Self, ValueError> {
        if key.len() != 32 {
            return Err(ValueError::from(
                "SSE-C keys need to be 256 bit base64 encoded",
            ));
        }
        let b64_key = base64_encode(key);
        let md5_key = md5sum_hash(key.as_bytes());
        let mut headers = HeaderMap::new();
        headers.insert(
            X_AMZ_SERVER_SIDE_ENCRYPTION_CUSTOMER_ALGORITHM,
            HeaderValue::from_static("AES256"),
        );
        headers.insert(X_AMZ_SERVER_SIDE_ENCRYPTION_CUSTOMER_KEY, b64_key.parse()?);
        headers.insert(X_AMZ_SERVER_SIDE_ENCRYPTION_CUSTOMER_KEY_MD5, md5_key.parse()?);
        Ok(Self { headers })
    }
}

impl Sse for SseCustomerKey {
    fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }
}

/// Server-side encryption - KMS type.
#[derive(Clone)]
pub struct SseKms(HeaderMap);

impl SseKms {
    /// `context_json` is the encryption context as a JSON document, sent base64 encoded.
    pub fn new(key_id: &str, context_json: Option<&str>) -> Result<Self, ValueError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_AMZ_SERVER_SIDE_ENCRYPTION,
            ServerSideEncryption::AwsKms.to_string().parse()?,
        );
        headers.insert(X_AMZ_SERVER_SIDE_ENCRYPTION_AWS_KMS_KEY_ID, key_id.parse()?);
        if let Some(context) = context_json {
            headers.insert(
                X_AMZ_SERVER_SIDE_ENCRYPTION_CONTEXT,
                base64_encode(context.as_bytes()).parse()?,
            );
        }
        Ok(Self(headers))
    }
}

impl Sse for SseKms {
    fn headers(&self) -> HeaderMap {
        self.0.clone()
    }
}

/// Server-side encryption - S3 type.
#[derive(Clone, Default)]
pub struct SseS3;

impl SseS3 {
    pub fn new() -> Self {
        Self
    }
}

impl Sse for SseS3 {
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_AMZ_SERVER_SIDE_ENCRYPTION,
            HeaderValue::from_static("AES256"),
        );
        headers
    }

    fn tls_required(&self) -> bool {
        false
    }
}
