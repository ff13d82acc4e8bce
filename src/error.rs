//! Error and Result module.
use hyper::header::{InvalidHeaderName, InvalidHeaderValue};
use hyper::http::uri::InvalidUri;
use serde::Deserialize;
use std::convert::Infallible;
use std::result;
use thiserror::Error;

/// A `Result` typedef to use with the [`Error`] type
pub type Result<T> = result::Result<T, Error>;

/// inducate an illegal variable was used.
#[derive(Debug, Error)]
#[error("value error: {0}")]
pub struct ValueError(String);

impl ValueError {
    pub fn new<T: Into<String>>(value: T) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ValueError {
    fn from(err: &str) -> Self {
        Self(err.to_string())
    }
}

impl From<String> for ValueError {
    fn from(err: String) -> Self {
        Self(err)
    }
}

impl From<InvalidHeaderValue> for ValueError {
    fn from(err: InvalidHeaderValue) -> Self {
        Self(err.to_string())
    }
}

impl From<InvalidHeaderName> for ValueError {
    fn from(err: InvalidHeaderName) -> Self {
        Self(err.to_string())
    }
}

impl From<InvalidUri> for ValueError {
    fn from(err: InvalidUri) -> Self {
        Self(err.to_string())
    }
}

impl From<Infallible> for ValueError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

/// XML parsing error.
#[derive(Debug, Error)]
#[error("xmlerror: {0}")]
pub struct XmlError(String);

impl XmlError {
    pub fn new<T: Into<String>>(value: T) -> Self {
        Self(value.into())
    }
}

impl From<quick_xml::DeError> for XmlError {
    fn from(err: quick_xml::DeError) -> Self {
        Self(err.to_string())
    }
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        Self(err.to_string())
    }
}

/// S3 service returned error response.
#[derive(Debug, Error, Deserialize)]
#[serde(rename_all = "PascalCase", rename = "Error")]
#[error("S3Error: {code}: {message}")]
pub struct S3Error {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub request_id: String,
    pub host_id: Option<String>,
    pub bucket_name: Option<String>,
    #[serde(rename = "Key")]
    pub object_name: Option<String>,
}

impl TryFrom<&[u8]> for S3Error {
    type Error = XmlError;

    fn try_from(res: &[u8]) -> result::Result<Self, Self::Error> {
        quick_xml::de::from_reader(res).map_err(Into::into)
    }
}

impl TryFrom<&str> for S3Error {
    type Error = XmlError;

    fn try_from(value: &str) -> result::Result<Self, Self::Error> {
        value.as_bytes().try_into()
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// inducate an illegal variable was used.
    #[error(transparent)]
    ValueError(#[from] ValueError),

    /// indicate XML parsing error.
    #[error(transparent)]
    XmlError(#[from] XmlError),

    /// indicate S3 service returned error response.
    #[error(transparent)]
    S3Error(#[from] S3Error),

    /// indicate conncet to S3 service failed.
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// indicate S3 service returned a failed status without a parsable error document.
    #[error("unexpected http response, status: {status}")]
    UnknownResponse { status: u16, body: String },
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::ValueError(err.into())
    }
}

impl From<InvalidHeaderValue> for Error {
    fn from(err: InvalidHeaderValue) -> Self {
        Error::ValueError(err.into())
    }
}

impl From<InvalidHeaderName> for Error {
    fn from(err: InvalidHeaderName) -> Self {
        Error::ValueError(err.into())
    }
}

impl From<InvalidUri> for Error {
    fn from(err: InvalidUri) -> Self {
        Error::ValueError(err.into())
    }
}

impl From<Infallible> for Error {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, S3Error, ValueError, XmlError};

    #[test]
    fn test_s3_error() {
        let res = r#"<?xml version="1.0" encoding="UTF-8"?>
        <Error>
            <Code>NoSuchBucket</Code>
            <Message>The specified bucket does not exist</Message>
            <Resource>/mybucket/myfoto.jpg</Resource>
            <RequestId>4442587FB7D0A2F9</RequestId>
            <BucketName>mybucket</BucketName>
        </Error>"#;
        let result: Result<S3Error, XmlError> = res.try_into();
        let err = result.unwrap();
        assert_eq!(err.code, "NoSuchBucket");
        assert_eq!(err.request_id, "4442587FB7D0A2F9");
        assert_eq!(err.bucket_name.as_deref(), Some("mybucket"));
        assert_eq!(err.object_name, None);
        assert_eq!(
            err.to_string(),
            "S3Error: NoSuchBucket: The specified bucket does not exist"
        );
    }

    #[test]
    fn test_s3_error_not_xml() {
        let result: Result<S3Error, XmlError> = "Bad Gateway".try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ValueError::from("Miss endpoint").into();
        assert!(matches!(err, Error::ValueError(_)));
        assert_eq!(err.to_string(), "value error: Miss endpoint");

        let err: Error = XmlError::new("unexpected end of document").into();
        assert_eq!(err.to_string(), "xmlerror: unexpected end of document");

        let err = Error::UnknownResponse {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected http response, status: 502");
    }
}
