use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

use self::transport::Transport;

pub mod builder;
pub mod checks;
pub mod client;
pub mod config;
pub mod console;
pub mod runner;
pub mod transport;
pub mod types;

pub use self::config::SmokeConfig;
pub use self::runner::{CheckOutcomes, SmokeRunner};

/// Client for the three endpoints exercised by the smoke run.
///
/// Construct one through [`SmokeClient::builder`].
#[derive(Clone)]
pub struct SmokeClient {
    transport: Arc<dyn Transport + Send + Sync>,
    health_timeout: Duration,
    generation_timeout: Duration,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP status {status} for url: {url}")]
    Http {
        status: u16,
        url: String,
        body: Bytes,
    },

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Console error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status code and body of the HTTP response behind this error, if the
    /// server answered at all.
    pub fn response(&self) -> Option<(u16, &Bytes)> {
        match self {
            Error::Http { status, body, .. } => Some((*status, body)),
            _ => None,
        }
    }
}
