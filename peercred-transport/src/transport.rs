//! The transport-credentials contract this crate implements.
//!
//! These traits stand in for the RPC framework's pluggable transport-security
//! capability set. The framework's own types stay out of this crate's data
//! model; anything framework-shaped is converted at this boundary.

use std::any::Any;
use std::sync::Arc;

use peercred_unix::{AttachedCredentials, PeerCredentials};

use crate::errors::HandshakeError;

/// Protocol information a framework consults before deciding whether a
/// security negotiation is required on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolInfo {
    /// Tag identifying the security protocol in effect.
    pub security_protocol: &'static str,
}

/// Per-connection authentication information, as published by a transport's
/// server handshake and attached by the framework to every request context
/// on that connection.
pub trait AuthInfo: Send + Sync + 'static {
    /// Short tag identifying the kind of authentication in place.
    fn auth_type(&self) -> &'static str;

    /// Typed access for extractors.
    fn as_any(&self) -> &dyn Any;
}

impl AuthInfo for PeerCredentials {
    fn auth_type(&self) -> &'static str {
        "peer-credentials"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The transport-security capability set a server installs as a plug-in.
///
/// `Clone` is part of the contract: a framework may duplicate the transport
/// per listener or per connection and expects equivalent, independent
/// instances.
pub trait TransportCredentials: Clone + Send + Sync {
    /// Complete the server side of the transport handshake for an accepted
    /// connection, returning the connection together with the authentication
    /// info the framework should attach to requests on it.
    fn server_handshake<S>(
        &self,
        stream: S,
    ) -> Result<(S, Option<Arc<dyn AuthInfo>>), HandshakeError>
    where
        S: AttachedCredentials;

    /// Complete the client side of the transport handshake against
    /// `server_name`.
    fn client_handshake<S>(
        &self,
        server_name: &str,
        stream: S,
    ) -> Result<(S, Arc<dyn AuthInfo>), HandshakeError>;

    /// The protocol information for this transport.
    fn info(&self) -> ProtocolInfo;

    /// Override the server name used for transport-level verification.
    fn override_server_name(&mut self, server_name: &str) -> Result<(), HandshakeError>;
}
