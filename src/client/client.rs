use std::sync::Arc;

use bytes::Bytes;
use hyper::{header, header::HeaderValue, HeaderMap};
use hyper::{Method, Uri};
use reqwest::Response;

use super::BaseExecutor;
use crate::error::{Result, ValueError};
use crate::provider::Provider;
use crate::signer::sign_request_v4;
use crate::utils::{check_bucket_name, urlencode, _VALID_ENDPOINT};
use crate::Credentials;

/// A `ClientBuilder` can be used to create a [`Client`] with custom configuration.
pub struct ClientBuilder {
    endpoint: Option<String>,
    region: String,
    agent: String,
    secure: bool,
    virtual_hosted: bool,
    provider: Option<Box<dyn Provider>>,
    client: Option<reqwest::Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        ClientBuilder {
            endpoint: None,
            secure: true,
            virtual_hosted: false,
            region: "us-east-1".to_string(),
            agent: concat!("multipart-rsc/", env!("CARGO_PKG_VERSION")).to_string(),
            provider: None,
            client: None,
        }
    }

    /// Set endpoint of a S3 service, `hostname[:port]`.
    pub fn endpoint<T: Into<String>>(mut self, endpoint: T) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set region name of buckets in S3 service.
    ///
    /// Default: `us-east-1`
    pub fn region<T: Into<String>>(mut self, region: T) -> Self {
        self.region = region.into();
        self
    }

    /// Set agent header for the client.
    ///
    /// Default: `multipart-rsc/<version>`
    pub fn agent<T: Into<String>>(mut self, agent: T) -> Self {
        self.agent = agent.into();
        self
    }

    /// Set flag to indicate to use secure (TLS) connection to S3 service or not.
    ///
    /// Default: `true`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set custom http [reqwest::Client].
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set flag to indicate to use Virtual-hosted–style or not.
    ///
    /// In a virtual-hosted–style URI, the bucket name is part of the domain name in the URL.
    /// like `https://bucket-name.s3.region-code.amazonaws.com`
    ///
    /// Default: `false`.
    pub fn virtual_hosted_style(mut self, virtual_hosted_style: bool) -> Self {
        self.virtual_hosted = virtual_hosted_style;
        self
    }

    /// Set credentials provider of your account in S3 service.
    ///
    /// **Required**.
    pub fn provider<P>(mut self, provider: P) -> Self
    where
        P: Provider + 'static,
    {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn build(self) -> std::result::Result<Client, ValueError> {
        let endpoint = self.endpoint.ok_or("Miss endpoint")?;
        if !_VALID_ENDPOINT.is_match(&endpoint) {
            return Err("Invalid endpoint".into());
        }
        let provider = self.provider.ok_or("Miss provider")?;

        let agent: HeaderValue = self
            .agent
            .parse()
            .map_err(|_| ValueError::from("Invalid agent"))?;

        let http = match self.client {
            Some(client) => client,
            None => {
                let mut headers = HeaderMap::new();
                headers.insert(header::USER_AGENT, agent.clone());
                reqwest::Client::builder()
                    .default_headers(headers)
                    .https_only(self.secure)
                    .build()
                    .map_err(|e| ValueError::new(e.to_string()))?
            }
        };
        Ok(Client {
            inner: Arc::new(ClientRef {
                endpoint,
                secure: self.secure,
                http,
                virtual_hosted: self.virtual_hosted,
                region: self.region,
                agent,
                provider,
            }),
        })
    }
}

/// Simple Storage Service (aka S3) client to initiate multipart uploads.
///
/// You do **not** have to wrap the `Client` in an [`Rc`](std::rc::Rc) or [`Arc`] to **reuse** it,
/// because it already uses an [`Arc`] internally.
///
/// ## Create a client
/// ```rust
/// use multipart_rsc::{provider::StaticProvider, Client};
/// let provider = StaticProvider::new("minio-access-key-test", "minio-secret-key-test", None);
/// let client = Client::builder()
///     .endpoint("localhost:9022")
///     .provider(provider)
///     .secure(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientRef>,
}

struct ClientRef {
    endpoint: String,
    virtual_hosted: bool,
    secure: bool,
    http: reqwest::Client,
    region: String,
    agent: HeaderValue,
    provider: Box<dyn Provider>,
}

impl Client {
    /// get a [`ClientBuilder`]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn region(&self) -> &str {
        self.inner.region.as_ref()
    }

    /// return whether the client connects over TLS.
    pub fn is_secure(&self) -> bool {
        self.inner.secure
    }

    #[inline]
    pub(super) async fn fetch_credentials(&self) -> Credentials {
        self.inner.provider.fetch().await
    }

    #[inline]
    pub(super) fn scheme(&self) -> &str {
        if self.inner.secure {
            "https"
        } else {
            "http"
        }
    }

    /// build uri for bucket/key
    ///
    /// uriencode(key)
    pub(super) fn _build_uri(&self, bucket: Option<&str>, key: Option<&str>) -> String {
        let scheme = self.scheme();
        let endpoint = self.inner.endpoint.as_str();
        match bucket {
            Some(b) => {
                let mut uri = if self.inner.virtual_hosted {
                    format!("{scheme}://{b}.{endpoint}")
                } else {
                    format!("{scheme}://{endpoint}/{b}")
                };
                if let Some(key) = key {
                    uri.push('/');
                    uri.push_str(&urlencode(key, true));
                }
                uri
            }
            None => format!("{scheme}://{endpoint}"),
        }
    }

    /// Sign and send an HTTP request.
    #[allow(clippy::too_many_arguments)]
    pub(super) async fn _execute(
        &self,
        method: Method,
        region: &str,
        bucket_name: Option<String>,
        object_name: Option<String>,
        body: Bytes,
        headers: HeaderMap,
        query: String,
    ) -> Result<Response> {
        if let Some(bucket_name) = &bucket_name {
            check_bucket_name(bucket_name)?;
        }
        if let Some(object_name) = &object_name {
            if object_name.is_empty() {
                return Err(ValueError::from("Object name cannot be empty.").into());
            }
            if bucket_name.is_none() {
                return Err(ValueError::from("Miss bucket name.").into());
            }
        }
        let mut uri = self._build_uri(bucket_name.as_deref(), object_name.as_deref());
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query);
        }
        let uri: Uri = uri.parse()?;

        let mut headers = headers;
        headers.insert(header::USER_AGENT, self.inner.agent.clone());
        let credentials = self.fetch_credentials().await;
        sign_request_v4(&method, &uri, &mut headers, region, &body, &credentials)?;

        log::debug!("{} {}", method, uri);
        let res = self
            .inner
            .http
            .request(method, uri.to_string())
            .headers(headers)
            .body(body)
            .send()
            .await?;
        log::debug!("response status: {}", res.status());
        Ok(res)
    }

    /// Create a [BaseExecutor] for a raw S3 request.
    #[inline]
    pub fn executor(&self, method: Method) -> BaseExecutor<'_> {
        BaseExecutor::new(method, self)
    }
}
