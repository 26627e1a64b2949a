//! The per-call request context surface and the credential extractor.

use std::fmt;
use std::sync::Arc;

use peercred_unix::PeerCredentials;

use crate::errors::ContextError;
use crate::transport::AuthInfo;

/// Peer information a framework attaches to every request context on a
/// connection.
///
/// The transport's server handshake is the sole producer of the auth-info
/// value; request handlers only ever read it back, through
/// [`peer_credentials`].
#[derive(Clone)]
pub struct Peer {
    auth_info: Option<Arc<dyn AuthInfo>>,
}

impl Peer {
    /// Build peer information from a server handshake result.
    pub fn new(auth_info: Option<Arc<dyn AuthInfo>>) -> Self {
        Self { auth_info }
    }

    /// The authentication info in place for the connection, if any.
    pub fn auth_info(&self) -> Option<&dyn AuthInfo> {
        self.auth_info.as_deref()
    }
}

impl fmt::Debug for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peer")
            .field("auth_type", &self.auth_info.as_ref().map(|a| a.auth_type()))
            .finish()
    }
}

/// The subset of a framework's per-request context this crate reads:
/// optional peer information, attached by the framework from the transport
/// handshake result.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    peer: Option<Peer>,
}

impl RequestContext {
    /// A context without peer information (e.g. outside any request).
    pub fn new() -> Self {
        Self::default()
    }

    /// A context for a request arriving over a connection with the given
    /// peer information.
    pub fn with_peer(peer: Peer) -> Self {
        Self { peer: Some(peer) }
    }

    /// The peer this request arrived from, if the framework attached one.
    pub fn peer(&self) -> Option<&Peer> {
        self.peer.as_ref()
    }
}

/// Extract the caller's OS credentials from a request context.
///
/// The two failure kinds stay distinct on purpose: [`ContextError::NoPeer`]
/// means the framework attached no peer information at all (wrong transport,
/// or called outside a request), while [`ContextError::NoCredentials`] means
/// a peer is present but carries no peer-credential auth info (the credential
/// transport was not installed, or the connection was not a local-domain
/// socket).
pub fn peer_credentials(cx: &RequestContext) -> Result<PeerCredentials, ContextError> {
    let peer = cx.peer().ok_or(ContextError::NoPeer)?;
    peer.auth_info()
        .and_then(|info| info.as_any().downcast_ref::<PeerCredentials>())
        .copied()
        .ok_or(ContextError::NoCredentials)
}
