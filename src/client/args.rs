use std::collections::HashMap;

use hyper::header::{self, HeaderName};
use hyper::HeaderMap;

use crate::datatype::RequestPayer;
use crate::error::Result;
use crate::header::*;
use crate::sse::Sse;
use crate::utils::urlencode;

/// Custom `create_multipart_upload` request parameters
///
/// - `bucket_name`: name of the bucket.
/// - `object_name`: object key of the upload.
/// - `content_type`: *Optional*, default `binary/octet-stream`.
/// - `metadata`: *Optional*, user-defined metadata.
/// - `tags`: *Optional*, tag set of the object.
/// - `storage_class`: *Optional*, e.g. `STANDARD`, `REDUCED_REDUNDANCY`.
/// - `sse`: *Optional*, server-side encryption.
/// - `request_payer`: *Optional*, acknowledge Requester Pays charges.
/// - `expected_bucket_owner`: *Optional*, account id of the expected bucket owner.
/// - `extra_headers`: *Optional*, Extra headers for advanced usage.
///
/// ## Example
/// ```rust
/// use multipart_rsc::client::CreateMultipartUploadArgs;
/// use multipart_rsc::sse::SseS3;
///
/// let args = CreateMultipartUploadArgs::new("bucket", "file.txt")
///     .content_type(Some("text/plain".to_string()))
///     .sse(&SseS3::new());
/// ```
#[derive(Debug, Clone)]
pub struct CreateMultipartUploadArgs {
    pub(crate) bucket_name: String,
    pub(crate) object_name: String,
    pub(crate) content_type: Option<String>,
    pub(crate) metadata: HashMap<String, String>,
    pub(crate) tags: HashMap<String, String>,
    pub(crate) storage_class: Option<String>,
    pub(crate) sse_headers: Option<HeaderMap>,
    pub(crate) sse_tls_required: bool,
    pub(crate) request_payer: Option<RequestPayer>,
    pub(crate) expected_bucket_owner: Option<String>,
    pub(crate) extra_headers: Option<HeaderMap>,
}

impl CreateMultipartUploadArgs {
    pub fn new<B: Into<String>, K: Into<String>>(bucket_name: B, object_name: K) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            content_type: None,
            metadata: HashMap::new(),
            tags: HashMap::new(),
            storage_class: None,
            sse_headers: None,
            sse_tls_required: false,
            request_payer: None,
            expected_bucket_owner: None,
            extra_headers: None,
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Set content-type of the object
    pub fn content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }

    /// Set user-defined metadata.
    /// Metadata is a set of key-value pairs.
    ///
    /// key:
    /// - requirement is ASCII and cannot contain non-ASCII characters
    /// - Cannot contain invisible characters and spaces
    /// - does't need to start with `x-amz-meta-`
    /// - ignoring case
    pub fn metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the tag set of the object, sent as `x-amz-tagging`.
    pub fn tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn storage_class(mut self, storage_class: Option<String>) -> Self {
        self.storage_class = storage_class;
        self
    }

    /// Set server-side encryption of the object.
    pub fn sse<S: Sse>(mut self, sse: &S) -> Self {
        self.sse_headers = Some(sse.headers());
        self.sse_tls_required = sse.tls_required();
        self
    }

    pub fn request_payer(mut self, request_payer: Option<RequestPayer>) -> Self {
        self.request_payer = request_payer;
        self
    }

    pub fn expected_bucket_owner(mut self, expected_bucket_owner: Option<String>) -> Self {
        self.expected_bucket_owner = expected_bucket_owner;
        self
    }

    /// Set extra headers for advanced usage.
    pub fn extra_headers(mut self, extra_headers: Option<HeaderMap>) -> Self {
        self.extra_headers = extra_headers;
        self
    }

    /// Returns the metadata header of this [`CreateMultipartUploadArgs`].
    fn get_metadata_header(&self) -> Result<HeaderMap> {
        let mut meta_header: HeaderMap = HeaderMap::new();
        for (key, value) in &self.metadata {
            let key = key.to_lowercase();
            let key = key.strip_prefix(X_AMZ_META_PREFIX).unwrap_or(&key);
            let key = HeaderName::from_bytes(format!("{X_AMZ_META_PREFIX}{key}").as_bytes())?;
            meta_header.insert(key, value.parse()?);
        }
        Ok(meta_header)
    }

    /// `x-amz-tagging` value, url-encoded `key=value` pairs sorted by key.
    fn get_tagging(&self) -> Option<String> {
        if self.tags.is_empty() {
            return None;
        }
        let mut tags: Vec<(&String, &String)> = self.tags.iter().collect();
        tags.sort();
        Some(
            tags.iter()
                .map(|(k, v)| format!("{}={}", urlencode(k, false), urlencode(v, false)))
                .collect::<Vec<String>>()
                .join("&"),
        )
    }

    /// Returns all headers of the `create_multipart_upload` request.
    pub fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = self.get_metadata_header()?;
        let content_type = self.content_type.as_deref().unwrap_or("binary/octet-stream");
        headers.insert(header::CONTENT_TYPE, content_type.parse()?);
        if let Some(tagging) = self.get_tagging() {
            headers.insert(X_AMZ_TAGGING, tagging.parse()?);
        }
        if let Some(storage_class) = &self.storage_class {
            headers.insert(X_AMZ_STORAGE_CLASS, storage_class.parse()?);
        }
        if let Some(payer) = self.request_payer {
            headers.insert(X_AMZ_REQUEST_PAYER, payer.to_string().parse()?);
        }
        if let Some(owner) = &self.expected_bucket_owner {
            headers.insert(X_AMZ_EXPECTED_BUCKET_OWNER, owner.parse()?);
        }
        if let Some(sse) = &self.sse_headers {
            headers.extend(sse.clone());
        }
        if let Some(extra) = &self.extra_headers {
            headers.extend(extra.clone());
        }
        Ok(headers)
    }
}

impl<B, K> From<(B, K)> for CreateMultipartUploadArgs
where
    B: Into<String>,
    K: Into<String>,
{
    fn from((bucket_name, object_name): (B, K)) -> Self {
        Self::new(bucket_name, object_name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::CreateMultipartUploadArgs;
    use crate::datatype::RequestPayer;
    use crate::sse::{SseCustomerKey, SseS3};

    #[test]
    fn test_default_headers() {
        let args: CreateMultipartUploadArgs = ("bucket", "file.txt").into();
        let headers = args.request_headers().unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["content-type"], "binary/octet-stream");
        assert!(!args.sse_tls_required);
    }

    #[test]
    fn test_request_headers() {
        let metadata = HashMap::from([
            ("Project".to_string(), "alpha".to_string()),
            ("x-amz-meta-owner".to_string(), "ops".to_string()),
        ]);
        let tags = HashMap::from([
            ("team".to_string(), "storage io".to_string()),
            ("env".to_string(), "dev".to_string()),
        ]);
        let args = CreateMultipartUploadArgs::new("bucket", "file.txt")
            .content_type(Some("text/plain".to_string()))
            .metadata(metadata)
            .tags(tags)
            .storage_class(Some("STANDARD_IA".to_string()))
            .request_payer(Some(RequestPayer::Requester))
            .expected_bucket_owner(Some("111122223333".to_string()))
            .sse(&SseS3::new());
        let headers = args.request_headers().unwrap();
        assert_eq!(headers["content-type"], "text/plain");
        assert_eq!(headers["x-amz-meta-project"], "alpha");
        assert_eq!(headers["x-amz-meta-owner"], "ops");
        assert_eq!(headers["x-amz-tagging"], "env=dev&team=storage%20io");
        assert_eq!(headers["x-amz-storage-class"], "STANDARD_IA");
        assert_eq!(headers["x-amz-request-payer"], "requester");
        assert_eq!(headers["x-amz-expected-bucket-owner"], "111122223333");
        assert_eq!(headers["x-amz-server-side-encryption"], "AES256");
    }

    #[test]
    fn test_ssec_requires_tls() {
        let ssec = SseCustomerKey::new("32byteslongsecretkeymustprovided").unwrap();
        let args = CreateMultipartUploadArgs::new("bucket", "file.txt").sse(&ssec);
        assert!(args.sse_tls_required);
        let headers = args.request_headers().unwrap();
        assert_eq!(
            headers["x-amz-server-side-encryption-customer-algorithm"],
            "AES256"
        );
    }

    #[test]
    fn test_invalid_metadata() {
        let metadata = HashMap::from([("bad key".to_string(), "v".to_string())]);
        let args = CreateMultipartUploadArgs::new("bucket", "file.txt").metadata(metadata);
        assert!(args.request_headers().is_err());
    }
}
