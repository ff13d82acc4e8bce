//! Data types

mod create_multipart_upload;

pub use create_multipart_upload::CreateMultipartUploadResult;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::Display;

use crate::error::ValueError;

/// The server-side encryption algorithm used when storing an object.
///
/// Valid Values: `AES256 | aws:kms | aws:kms:dsse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
pub enum ServerSideEncryption {
    #[strum(serialize = "AES256")]
    #[serde(rename = "AES256")]
    Aes256,
    #[strum(serialize = "aws:kms")]
    #[serde(rename = "aws:kms")]
    AwsKms,
    #[strum(serialize = "aws:kms:dsse")]
    #[serde(rename = "aws:kms:dsse")]
    AwsKmsDsse,
}

impl FromStr for ServerSideEncryption {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AES256" => Ok(Self::Aes256),
            "aws:kms" => Ok(Self::AwsKms),
            "aws:kms:dsse" => Ok(Self::AwsKmsDsse),
            _ => Err(ValueError::new(format!(
                "unknown server side encryption: {s}"
            ))),
        }
    }
}

/// Indicates that the requester was successfully charged for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
pub enum RequestCharged {
    #[strum(serialize = "requester")]
    #[serde(rename = "requester")]
    Requester,
}

impl FromStr for RequestCharged {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requester" => Ok(Self::Requester),
            _ => Err(ValueError::new(format!("unknown request charged: {s}"))),
        }
    }
}

/// Confirms that the requester knows that they will be charged for the request.
///
/// Sent as `x-amz-request-payer` to buckets with Requester Pays enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
pub enum RequestPayer {
    #[strum(serialize = "requester")]
    #[serde(rename = "requester")]
    Requester,
}

impl FromStr for RequestPayer {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requester" => Ok(Self::Requester),
            _ => Err(ValueError::new(format!("unknown request payer: {s}"))),
        }
    }
}

/// The algorithm used to create a checksum of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
pub enum ChecksumAlgorithm {
    CRC32,
    CRC32C,
    SHA1,
    SHA256,
}

impl FromStr for ChecksumAlgorithm {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CRC32" => Ok(Self::CRC32),
            "CRC32C" => Ok(Self::CRC32C),
            "SHA1" => Ok(Self::SHA1),
            "SHA256" => Ok(Self::SHA256),
            _ => Err(ValueError::new(format!("unknown checksum algorithm: {s}"))),
        }
    }
}
