use thiserror::Error;

/// Failures from the transport handshake surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandshakeError {
    /// The peer-credential transport is server-only: a process cannot assert
    /// its own OS identity to a remote peer. Fixed and non-retryable.
    #[error("client-side handshake is not supported by the peer-credential transport")]
    ClientUnsupported,
}

/// Failures when extracting credentials from a request context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The framework attached no peer information to this context at all.
    #[error("request context has no peer information")]
    NoPeer,

    /// Peer information is present but carries no peer-credential auth info.
    #[error("peer carries no process credentials")]
    NoCredentials,
}
