//! Expose Unix peer credentials through an RPC framework's transport
//! credentials plug-in point.
//!
//! The pieces cooperate like this: a `CredentialListener` (from
//! `peercred-unix`) captures each client's pid/uid/gid at accept time;
//! [`CredentialTransport`] implements the framework-facing
//! [`TransportCredentials`] contract and republishes those credentials as the
//! connection's authentication info instead of negotiating any encryption;
//! the framework threads that info into every request's [`RequestContext`];
//! and handlers call [`peer_credentials`] to read the caller's identity back
//! out.
//!
//! ```no_run
//! use peercred_transport::{
//!     CredentialTransport, Peer, RequestContext, TransportCredentials, peer_credentials,
//! };
//! use peercred_unix::CredentialListener;
//!
//! # async fn serve() -> Result<(), Box<dyn std::error::Error>> {
//! let listener = CredentialListener::bind("/run/myapp/rpc.sock")?;
//! let transport = CredentialTransport::new();
//!
//! let conn = listener.accept().await?;
//! let (conn, auth_info) = transport.server_handshake(conn)?;
//!
//! // The framework attaches the handshake result to each request context...
//! let cx = RequestContext::with_peer(Peer::new(auth_info));
//!
//! // ...and the handler reads the caller's identity back out.
//! let creds = peer_credentials(&cx)?;
//! println!("called by pid={} uid={}", creds.pid, creds.uid);
//! # drop(conn);
//! # Ok(())
//! # }
//! ```
//!
//! This transport deliberately does not secure the channel: the protocol tag
//! it advertises is unknown to any encryption machinery, precisely so that no
//! negotiation is attempted. It provides identity, not confidentiality or
//! integrity — appropriate for a local-domain socket whose reachability is
//! already governed by filesystem permissions.

pub mod adapter;
pub mod context;
pub mod errors;
pub mod transport;

pub use adapter::{CredentialTransport, SECURITY_PROTOCOL};
pub use context::{Peer, RequestContext, peer_credentials};
pub use errors::{ContextError, HandshakeError};
pub use peercred_unix::PeerCredentials;
pub use transport::{AuthInfo, ProtocolInfo, TransportCredentials};
