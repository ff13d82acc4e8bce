#![cfg_attr(not(doctest), doc = include_str!("../README.md"))]

pub mod client;
mod credentials;
pub mod datatype;
pub mod error;
pub mod header;
pub mod provider;
mod signer;
pub mod sse;
pub mod time;
mod utils;

pub use crate::client::Client;
pub use crate::credentials::Credentials;
pub use crate::signer::{sign_request_v4, sign_v4_authorization};
