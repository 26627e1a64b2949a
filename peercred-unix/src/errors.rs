use std::path::PathBuf;

use thiserror::Error;

/// Failures while binding a listener.
///
/// "Address already in use" is its own variant so callers can retry on reuse
/// and fail fast on everything else.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("address already in use at {socket_path}")]
    AddrInUse {
        socket_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot bind unix socket at {socket_path}: {source}")]
    Bind {
        socket_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to reuse {socket_path}: path is a symlink")]
    Symlink { socket_path: PathBuf },

    #[error("stale socket at {socket_path} cannot be removed: {source}")]
    StaleSocket {
        socket_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set socket permissions at {socket_path}: {source}")]
    Permissions {
        socket_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while accepting a connection.
#[derive(Debug, Error)]
pub enum AcceptError {
    /// The listener was closed; no further connections will be accepted.
    #[error("listener is closed")]
    Closed,

    /// The underlying accept failed; the OS error is passed through verbatim.
    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),

    /// The connection was accepted but its peer credentials could not be
    /// determined. The connection is dropped rather than handed out, so this
    /// can never be confused with a transport that has no credentials.
    #[error("failed to query peer credentials: {0}")]
    CredentialQuery(#[source] std::io::Error),
}
