//! HTTP listener settings.

use std::net::SocketAddr;

/// Network settings for the API listener.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub listen: SocketAddr,
}
