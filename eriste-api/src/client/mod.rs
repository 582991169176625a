//! HTTP delivery of gateway-style callbacks.
//!
//! Behind the `client` cargo feature, so crates that only need the shared
//! types never pull in `reqwest`.

mod callback;

pub use callback::CallbackSender;

use reqwest::StatusCode;

/// Failures while delivering a callback.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure before any response arrived.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The storefront answered with a non-2xx status.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// The payload or the acknowledgement body did not (de)serialize.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
