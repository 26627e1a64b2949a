//! The listener and connection seams the credential machinery plugs into.
//!
//! Whether a transport can identify its peer is an explicit capability query
//! on the connection ([`Socket::credential_source`]), resolved once at accept
//! time, rather than a type check scattered across callers. Transports
//! without the capability (TCP today, anything else tomorrow) stay fully
//! usable; their connections simply carry no credentials.

use std::fmt;
use std::future::Future;
use std::io;
use std::os::fd::AsFd;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream, UnixListener, UnixStream};

use crate::credentials::{CredentialSource, PeerCredentials};

/// A byte-stream connection as produced by a [`Listener`].
pub trait Socket: AsyncRead + AsyncWrite + fmt::Debug + Send + Unpin {
    /// A handle for querying the peer's OS credentials, or `None` when the
    /// transport has no notion of an OS peer.
    fn credential_source(&self) -> Option<CredentialSource<'_>>;
}

impl Socket for UnixStream {
    fn credential_source(&self) -> Option<CredentialSource<'_>> {
        Some(CredentialSource::new(self.as_fd()))
    }
}

impl Socket for TcpStream {
    fn credential_source(&self) -> Option<CredentialSource<'_>> {
        None
    }
}

/// Accepts incoming connections.
pub trait Listener: Send + Sync {
    /// The connection type this listener produces.
    type Stream: Socket;

    /// Wait for and accept the next pending connection.
    fn accept(&self) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

impl Listener for UnixListener {
    type Stream = UnixStream;

    async fn accept(&self) -> io::Result<UnixStream> {
        UnixListener::accept(self).await.map(|(stream, _addr)| stream)
    }
}

impl Listener for TcpListener {
    type Stream = TcpStream;

    async fn accept(&self) -> io::Result<TcpStream> {
        TcpListener::accept(self).await.map(|(stream, _addr)| stream)
    }
}

/// Read access to the credentials captured for a connection at accept time.
///
/// Transport plugins take any `AttachedCredentials` value, so connections
/// that never went through a credential-extracting listener degrade to
/// `None` instead of requiring a downcast.
pub trait AttachedCredentials {
    /// The credentials captured when this connection was accepted, if any.
    fn attached_credentials(&self) -> Option<PeerCredentials>;
}

// Raw streams carry nothing: capture happens in the accept path of
// `CredentialListener`, never lazily.
impl AttachedCredentials for UnixStream {
    fn attached_credentials(&self) -> Option<PeerCredentials> {
        None
    }
}

impl AttachedCredentials for TcpStream {
    fn attached_credentials(&self) -> Option<PeerCredentials> {
        None
    }
}

impl<T: AttachedCredentials + ?Sized> AttachedCredentials for Box<T> {
    fn attached_credentials(&self) -> Option<PeerCredentials> {
        (**self).attached_credentials()
    }
}

/// Connection-only view of an accepted stream: byte-stream I/O plus read
/// access to whatever accept captured.
pub trait ServerStream: AsyncRead + AsyncWrite + AttachedCredentials + Send + Unpin {}

impl<T> ServerStream for T where T: AsyncRead + AsyncWrite + AttachedCredentials + Send + Unpin {}
