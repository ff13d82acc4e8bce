//! This module implements all helpers for AWS Signature version '4' support.
use hmac::{Hmac, Mac};
use hyper::{
    header::{self, InvalidHeaderValue},
    HeaderMap, Method, Uri,
};
use sha2::{Digest, Sha256};

use crate::credentials::Credentials;
use crate::header::{X_AMZ_CONTENT_SHA256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN};
use crate::time::UtcTime;
use crate::utils::{trim_bytes, EMPTY_CONTENT_SHA256};

type HmacSha256 = Hmac<Sha256>;

/// Return HMacSHA256 digest of given key and data.
fn _hmac_hash(key: &[u8], data: &str) -> Vec<u8> {
    // HMAC accepts keys of any length
    let mut hasher = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    hasher.update(data.as_bytes());
    hasher.finalize().into_bytes().to_vec()
}

/// Compute Mac-SHA-256 of data and return hash as hex encoded value.
///
/// Return Hex(HMAC-SHA256(key, data)).
#[inline]
pub fn hmac_hash_hex(key: &[u8], data: &str) -> String {
    hex::encode(_hmac_hash(key, data))
}

/// Compute SHA-256 of data and return hash as hex encoded value.
#[inline]
pub fn sha256_hash(date: &[u8]) -> String {
    hex::encode(Sha256::digest(date))
}

/// Get scope string.
///
/// `date.Format(<YYYYMMDD>) + "/" + <region> + "/" + <service> + "/aws4_request"`
#[inline]
fn _get_scope(date: &UtcTime, region: &str, service_name: &str) -> String {
    format!(
        "{}/{}/{}/aws4_request",
        date.aws_format_date(),
        region,
        service_name
    )
}

/// Trim the value and collapse sequential spaces into a single space.
fn _trim_all(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for &b in trim_bytes(value) {
        if b == b' ' && out.last() == Some(&b' ') {
            continue;
        }
        out.push(b);
    }
    out
}

/// Get canonical query string.
///
/// query string parameters is assumed be URI-encoded
fn _get_canonical_query_string(query: &str) -> String {
    let mut querys: Vec<(&str, &str)> = query
        .split('&')
        .filter(|x| !x.is_empty())
        .map(|q| q.split_once('=').unwrap_or((q, "")))
        .collect();
    querys.sort();
    querys
        .iter()
        .map(|&(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&")
}

/// Get canonical request hash and signed_headers.
///
/// `Hex(SHA256Hash(Canonical Request)))`
///
/// CanonicalRequest =
///     HTTPRequestMethod + '\n' +
///     CanonicalURI + '\n' +
///     CanonicalQueryString + '\n' +
///     CanonicalHeaders + '\n' +
///     SignedHeaders + '\n' +
///     HashedPayload
fn _get_canonical_request_hash(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    content_sha256: &str,
) -> (String, String) {
    let mut cr: Vec<u8> = Vec::new();

    // HTTPRequestMethod
    cr.extend_from_slice(method.as_str().as_bytes());
    cr.push(b'\n');

    // CanonicalURI
    cr.extend_from_slice(uri.path().as_bytes());
    cr.push(b'\n');

    // CanonicalQueryString
    let canonical_query_string = _get_canonical_query_string(uri.query().unwrap_or(""));
    cr.extend_from_slice(canonical_query_string.as_bytes());
    cr.push(b'\n');

    // CanonicalHeaders and SignedHeaders
    let mut canonical_hdrs = headers
        .iter()
        .filter(|&(name, _)| name != header::USER_AGENT && name != header::AUTHORIZATION)
        .collect::<Vec<_>>();
    canonical_hdrs.sort_by_key(|f| f.0.as_str());
    let mut signed_headers: Vec<&str> = Vec::with_capacity(canonical_hdrs.len());
    for (h, v) in canonical_hdrs {
        cr.extend_from_slice(h.as_str().as_bytes());
        cr.push(b':');
        cr.extend_from_slice(&_trim_all(v.as_bytes()));
        cr.push(b'\n');
        signed_headers.push(h.as_str());
    }
    cr.push(b'\n');
    let signed_headers = signed_headers.join(";");
    cr.extend_from_slice(signed_headers.as_bytes());
    cr.push(b'\n');

    // HashedPayload
    cr.extend_from_slice(content_sha256.as_bytes());

    (sha256_hash(&cr), signed_headers)
}

/// Get string-to-sign
///
/// "AWS4-HMAC-SHA256" + "\n" +
/// timeStampISO8601Format + "\n" +
/// <Scope> + "\n" +
/// Hex(SHA256Hash(Canonical Request)))
#[inline]
fn _get_string_to_sign(date: &UtcTime, scope: &str, canonical_request_hash: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        date.aws_format_time(),
        scope,
        canonical_request_hash,
    )
}

/// Get signing key
///
/// DateKey = HMAC-SHA256("AWS4"+"<SecretAccessKey>", "<YYYYMMDD>")
/// DateRegionKey = HMAC-SHA256(<DateKey>, "<aws-region>")
/// DateRegionServiceKey = HMAC-SHA256(<DateRegionKey>, "<aws-service>")
/// SigningKey = HMAC-SHA256(<DateRegionServiceKey>, "aws4_request")
fn _get_signing_key(secret_key: &str, date: &UtcTime, region: &str, service_name: &str) -> Vec<u8> {
    let secret_access_key = format!("AWS4{}", secret_key);
    let date_key = _hmac_hash(secret_access_key.as_bytes(), &date.aws_format_date());
    let date_region_key = _hmac_hash(&date_key, region);
    let date_region_service_key = _hmac_hash(&date_region_key, service_name);
    _hmac_hash(&date_region_service_key, "aws4_request")
}

/// Do signature V4 of given request for given service name.
///
/// Returns the `Authorization` header value.
#[allow(clippy::too_many_arguments)]
pub fn sign_v4_authorization(
    method: &Method,
    uri: &Uri,
    region: &str,
    service_name: &str,
    headers: &HeaderMap,
    access_key: &str,
    secret_key: &str,
    content_sha256: &str,
    date: &UtcTime,
) -> String {
    let scope = _get_scope(date, region, service_name);
    let (canonical_request_hash, signed_headers) =
        _get_canonical_request_hash(method, uri, headers, content_sha256);

    let string_to_sign = _get_string_to_sign(date, &scope, &canonical_request_hash);

    let signing_key = _get_signing_key(secret_key, date, region, service_name);

    let signature = hmac_hash_hex(&signing_key, &string_to_sign);

    format!(
        "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        access_key, scope, signed_headers, signature
    )
}

/// Do signature V4 of given request params for S3,
/// add the headers required by S3 and the `Authorization` header.
///
/// The payload is sent in a single chunk.
pub fn sign_request_v4(
    method: &Method,
    uri: &Uri,
    headers: &mut HeaderMap,
    region: &str,
    body: &[u8],
    credentials: &Credentials,
) -> Result<(), InvalidHeaderValue> {
    let date = UtcTime::now();

    // add s3 header
    if let Some(authority) = uri.authority() {
        headers.insert(header::HOST, authority.as_str().parse()?);
    }
    headers.insert(X_AMZ_DATE, date.aws_format_time().parse()?);
    headers.insert(header::CONTENT_LENGTH, body.len().into());
    let content_sha256 = if body.is_empty() {
        EMPTY_CONTENT_SHA256.to_owned()
    } else {
        sha256_hash(body)
    };
    headers.insert(X_AMZ_CONTENT_SHA256, content_sha256.parse()?);
    if let Some(token) = credentials.session_token() {
        headers.insert(X_AMZ_SECURITY_TOKEN, token.parse()?);
    }

    let auth_header = sign_v4_authorization(
        method,
        uri,
        region,
        "s3",
        headers,
        credentials.access_key(),
        credentials.secret_key(),
        &content_sha256,
        &date,
    );
    headers.insert(header::AUTHORIZATION, auth_header.parse()?);
    Ok(())
}
