//! S3 client
mod args;
#[allow(clippy::module_inception)]
mod client;
mod executor;
mod multipart_upload;
mod querymap;

pub use args::CreateMultipartUploadArgs;
pub use client::{Client, ClientBuilder};
pub use executor::BaseExecutor;
pub use querymap::QueryMap;
