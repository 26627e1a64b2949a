//! An accepted connection paired with its accept-time credentials.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::credentials::PeerCredentials;
use crate::socket::{AttachedCredentials, Socket};

/// An accepted connection and the credentials captured for it.
///
/// Produced by [`CredentialListener::accept`]; reads and writes are proxied
/// to the wrapped stream without buffering. The credential field is fixed at
/// construction and never changes. Dropping the connection closes it;
/// `shutdown` is idempotent and may be called more than once.
///
/// [`CredentialListener::accept`]: crate::listener::CredentialListener::accept
#[derive(Debug)]
pub struct CredentialConnection<S> {
    stream: S,
    credentials: Option<PeerCredentials>,
}

impl<S: Socket> CredentialConnection<S> {
    /// Pair an accepted stream with the credentials captured for it.
    pub fn new(stream: S, credentials: Option<PeerCredentials>) -> Self {
        Self { stream, credentials }
    }

    /// The peer credentials captured at accept time, if any.
    pub fn credentials(&self) -> Option<PeerCredentials> {
        self.credentials
    }

    /// A shared reference to the wrapped stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// A mutable reference to the wrapped stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Unwrap the connection, giving up the attached credentials.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S> AttachedCredentials for CredentialConnection<S> {
    fn attached_credentials(&self) -> Option<PeerCredentials> {
        self.credentials
    }
}

impl<S: Socket> AsyncRead for CredentialConnection<S> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_read(cx, buf)
    }
}

impl<S: Socket> AsyncWrite for CredentialConnection<S> {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.stream).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_shutdown(cx)
    }

    fn poll_write_vectored(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.stream).poll_write_vectored(cx, bufs)
    }

    fn is_write_vectored(&self) -> bool {
        self.stream.is_write_vectored()
    }
}
