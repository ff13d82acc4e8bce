#![allow(dead_code)]
use std::convert::Infallible;
use std::env;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, HeaderMap, Method, Request, Response, Server, StatusCode};
use multipart_rsc::{provider::StaticProvider, Client};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Client of a live S3 service configured from the environment (or a `.env` file).
pub fn get_test_client() -> Option<Client> {
    dotenv::dotenv().ok();
    let provider = StaticProvider::from_env()?;
    let host = env::var("MINIO_HOST").unwrap_or("localhost:9022".to_owned());
    Client::builder()
        .endpoint(host)
        .provider(provider)
        .secure(false)
        .build()
        .ok()
}

/// A request received by [MockS3].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
}

/// The canned response [MockS3] replies with.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: &'static str,
}

impl MockResponse {
    pub fn ok(headers: Vec<(&'static str, &'static str)>, body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            headers,
            body,
        }
    }

    pub fn status(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            headers: vec![("content-type", "application/xml")],
            body,
        }
    }
}

/// A local HTTP server standing in for S3.
pub struct MockS3 {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockS3 {
    pub async fn start(response: MockResponse) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let make_svc = make_service_fn(move |_conn| {
            let recorded = recorded.clone();
            let response = response.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                    let recorded = recorded.clone();
                    let response = response.clone();
                    async move {
                        recorded.lock().unwrap().push(RecordedRequest {
                            method: req.method().clone(),
                            path: req.uri().path().to_owned(),
                            query: req.uri().query().map(ToOwned::to_owned),
                            headers: req.headers().clone(),
                        });
                        let mut builder = Response::builder().status(response.status);
                        for (k, v) in &response.headers {
                            builder = builder.header(*k, *v);
                        }
                        Ok::<_, Infallible>(builder.body(Body::from(response.body)).unwrap())
                    }
                }))
            }
        });
        let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_svc);
        let addr = server.local_addr();
        tokio::spawn(server);
        Self { addr, requests }
    }

    pub fn client(&self) -> Client {
        Client::builder()
            .endpoint(self.addr.to_string())
            .provider(StaticProvider::new("test-access-key", "test-secret-key", None))
            .secure(false)
            .build()
            .unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}
