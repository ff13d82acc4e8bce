use bytes::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method};
use reqwest::Response;

use super::{Client, QueryMap};
use crate::error::{Error, Result, S3Error};

/// An executor builds the S3 request.
/// ```rust
/// use hyper::Method;
/// use reqwest::Response;
/// use multipart_rsc::Client;
/// use multipart_rsc::error::Result;
///
/// async fn create_multipart_upload(client: Client) -> Result<String> {
///     let executor = client.executor(Method::POST);
///     let res: Response = executor
///         .bucket_name("bucket")
///         .object_name("test.txt")
///         .query_string("uploads")
///         .send_ok()
///         .await?;
///     Ok(res.text().await?)
/// }
/// ```
pub struct BaseExecutor<'a> {
    method: Method,
    region: String,
    bucket_name: Option<String>,
    object_name: Option<String>,
    body: Bytes,
    headers: HeaderMap,
    querys: QueryMap,
    client: &'a Client,
    build_err: Option<Error>,
}

impl<'a> BaseExecutor<'a> {
    pub fn new(method: Method, client: &'a Client) -> Self {
        Self {
            method,
            region: client.region().to_string(),
            bucket_name: None,
            object_name: None,
            body: Bytes::new(),
            headers: HeaderMap::new(),
            client,
            querys: QueryMap::new(),
            build_err: None,
        }
    }

    /// Set the bucket name.
    pub fn bucket_name<T: Into<String>>(mut self, name: T) -> Self {
        self.bucket_name = Some(name.into());
        self
    }

    /// Set the object name.
    pub fn object_name<T: Into<String>>(mut self, name: T) -> Self {
        self.object_name = Some(name.into());
        self
    }

    /// Set the region.
    pub fn region<T: Into<String>>(mut self, region: T) -> Self {
        self.region = region.into();
        self
    }

    /// Set the request body.
    pub fn body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// Inserts a key-value pair into the request header.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<Error>,
    {
        let key = <HeaderName as TryFrom<K>>::try_from(key).map_err(Into::into);
        let value = <HeaderValue as TryFrom<V>>::try_from(value).map_err(Into::into);
        match (key, value) {
            (Ok(key), Ok(val)) => {
                self.headers.insert(key, val);
            }
            (Err(e), _) | (_, Err(e)) => {
                self.build_err.get_or_insert(e);
            }
        };
        self
    }

    /// Merge header into request header.
    #[inline]
    pub fn headers_merge(mut self, header: HeaderMap) -> Self {
        self.headers.extend(header);
        self
    }

    /// Inserts a key-value pair into the query map.
    pub fn query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.querys.insert(key.into(), value.into());
        self
    }

    /// Inserts query_string into the query map.
    pub fn query_string(mut self, query_str: &str) -> Self {
        self.querys.merge_str(query_str);
        self
    }

    pub fn apply<F>(self, apply: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        apply(self)
    }

    /// Send an HTTP request to S3 and return a Result<[Response]>.
    ///
    /// note: this is just a response from the s3 service, probably a wrong response.
    pub async fn send(self) -> Result<Response> {
        if let Some(err) = self.build_err {
            return Err(err);
        }
        let query = self.querys.to_query_string();
        self.client
            ._execute(
                self.method,
                &self.region,
                self.bucket_name,
                self.object_name,
                self.body,
                self.headers,
                query,
            )
            .await
    }

    /// Send an HTTP request to S3 and return a Result<[Response]>.
    ///
    /// A failed status is turned into [Error::S3Error] when the body is an S3 error document,
    /// otherwise into [Error::UnknownResponse].
    pub async fn send_ok(self) -> Result<Response> {
        let res = self.send().await?;
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status().as_u16();
        let text = res.text().await?;
        match S3Error::try_from(text.as_str()) {
            Ok(err) => {
                log::debug!("S3 error response {status}: {}", err.code);
                Err(err.into())
            }
            Err(_) => Err(Error::UnknownResponse { status, body: text }),
        }
    }
}
