//! The peer-credential transport adapter.

use std::sync::Arc;

use peercred_unix::AttachedCredentials;
use tracing::debug;

use crate::errors::HandshakeError;
use crate::transport::{AuthInfo, ProtocolInfo, TransportCredentials};

/// Name the adapter advertises as its security protocol.
///
/// Deliberately unknown to any encryption machinery: a framework that sees
/// this tag must not start a TLS negotiation on the channel.
pub const SECURITY_PROTOCOL: &str = "peercred";

/// Server-side transport credentials backed by accept-time peer credentials.
///
/// The handshake consumes no bytes and negotiates nothing; it reads the
/// credentials a `CredentialListener` attached to the connection and
/// republishes them as the connection's authentication info, where
/// [`peer_credentials`](crate::context::peer_credentials) can find them from
/// request handlers. Connections without attached credentials pass through
/// with no authentication info.
///
/// This transport provides *identity*, not confidentiality or integrity.
/// Client-side use is rejected: a process cannot assert its own OS identity
/// to a remote peer through this mechanism.
///
/// The adapter holds no state; clones are independent and equivalent, and a
/// single instance is safe to share across connections without
/// synchronization.
#[derive(Debug, Clone, Default)]
pub struct CredentialTransport;

impl CredentialTransport {
    /// Create the adapter.
    pub fn new() -> Self {
        Self
    }
}

impl TransportCredentials for CredentialTransport {
    fn server_handshake<S>(
        &self,
        stream: S,
    ) -> Result<(S, Option<Arc<dyn AuthInfo>>), HandshakeError>
    where
        S: AttachedCredentials,
    {
        let auth = stream.attached_credentials().map(|creds| {
            debug!(%creds, "publishing peer credentials as connection auth info");
            Arc::new(creds) as Arc<dyn AuthInfo>
        });
        Ok((stream, auth))
    }

    fn client_handshake<S>(
        &self,
        _server_name: &str,
        _stream: S,
    ) -> Result<(S, Arc<dyn AuthInfo>), HandshakeError> {
        Err(HandshakeError::ClientUnsupported)
    }

    fn info(&self) -> ProtocolInfo {
        ProtocolInfo {
            security_protocol: SECURITY_PROTOCOL,
        }
    }

    fn override_server_name(&mut self, _server_name: &str) -> Result<(), HandshakeError> {
        // No TLS server name is ever verified on this transport.
        Ok(())
    }
}

#[cfg(test)]
mod tests;
