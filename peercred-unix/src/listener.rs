//! The credential-extracting listener.

use std::io;
use std::path::{Path, PathBuf};

use tokio::net::UnixListener;
use tokio::sync::watch;
use tracing::debug;

use crate::connection::CredentialConnection;
use crate::errors::{AcceptError, BindError};
use crate::socket::{Listener, ServerStream, Socket};

/// Bind-time handling of the socket file.
///
/// The defaults leave the filesystem alone: no stale-socket unlinking and no
/// permission change. Cleanup on shutdown stays the caller's responsibility
/// either way.
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    /// Remove an existing socket file before binding. Symlinked paths are
    /// refused rather than followed.
    pub unlink_stale: bool,
    /// File mode to apply to the bound socket, e.g. `0o660` to open it up to
    /// a group.
    pub mode: Option<u32>,
}

/// A listener that captures each client's OS identity at accept time.
///
/// Wraps one underlying listener for its whole lifetime. Each accept of a
/// local-domain connection issues a single `SO_PEERCRED` query before the
/// connection is returned, so no task can ever observe a local connection
/// without its credentials. Accepts are otherwise independent; the listener
/// keeps no per-connection state.
#[derive(Debug)]
pub struct CredentialListener<L = UnixListener> {
    inner: L,
    path: Option<PathBuf>,
    closed: watch::Sender<bool>,
}

impl CredentialListener<UnixListener> {
    /// Bind a Unix domain socket at `path`.
    ///
    /// An already-taken path is reported as [`BindError::AddrInUse`], kept
    /// distinct from every other bind failure so callers can decide between
    /// retrying and failing fast. Must be called from within a tokio runtime.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self, BindError> {
        Self::bind_with(path, &BindOptions::default())
    }

    /// Bind a Unix domain socket at `path` with explicit [`BindOptions`].
    pub fn bind_with(path: impl AsRef<Path>, options: &BindOptions) -> Result<Self, BindError> {
        let path = path.as_ref().to_path_buf();

        if options.unlink_stale {
            remove_stale_socket(&path)?;
        }

        let inner = UnixListener::bind(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::AddrInUse {
                BindError::AddrInUse {
                    socket_path: path.clone(),
                    source: e,
                }
            } else {
                BindError::Bind {
                    socket_path: path.clone(),
                    source: e,
                }
            }
        })?;

        if let Some(mode) = options.mode {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).map_err(
                |e| BindError::Permissions {
                    socket_path: path.clone(),
                    source: e,
                },
            )?;
        }

        debug!(path = %path.display(), "bound unix socket listener");

        let (closed, _) = watch::channel(false);
        Ok(Self {
            inner,
            path: Some(path),
            closed,
        })
    }
}

impl<L: Listener> CredentialListener<L> {
    /// Wrap an already-bound listener.
    ///
    /// Connections from transports without the credential capability are
    /// still accepted; they simply carry no credentials.
    pub fn from_listener(inner: L) -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            inner,
            path: None,
            closed,
        }
    }

    /// Accept the next pending connection.
    ///
    /// For transports exposing the credential capability, the kernel is
    /// queried exactly once before the connection is returned. A failed query
    /// fails the whole accept with [`AcceptError::CredentialQuery`] and drops
    /// the connection: handing it out with no credentials would be
    /// indistinguishable from a transport that cannot have any. Subsequent
    /// accepts are unaffected.
    ///
    /// Returns [`AcceptError::Closed`] once [`close`](Self::close) has been
    /// called, including for an accept already blocked in this method.
    pub async fn accept(&self) -> Result<CredentialConnection<L::Stream>, AcceptError> {
        let mut closed = self.closed.subscribe();
        if *closed.borrow() {
            return Err(AcceptError::Closed);
        }

        let stream = tokio::select! {
            res = self.inner.accept() => res.map_err(AcceptError::Accept)?,
            _ = closed.changed() => return Err(AcceptError::Closed),
        };

        let credentials = match stream.credential_source() {
            Some(source) => Some(source.query().map_err(AcceptError::CredentialQuery)?),
            None => None,
        };

        match credentials {
            Some(creds) => debug!(%creds, "accepted connection"),
            None => debug!("accepted connection without credential capability"),
        }

        Ok(CredentialConnection::new(stream, credentials))
    }

    /// Accept the next pending connection as a plain byte stream.
    ///
    /// Same accept as [`accept`](Self::accept), for callers that only need
    /// I/O. The credentials stay attached and remain reachable through
    /// [`AttachedCredentials`](crate::socket::AttachedCredentials).
    pub async fn accept_stream(&self) -> Result<impl ServerStream + use<L>, AcceptError> {
        self.accept().await
    }

    /// Stop accepting.
    ///
    /// An accept blocked in [`accept`](Self::accept) returns
    /// [`AcceptError::Closed`] promptly; later accepts fail the same way.
    /// The underlying listener (and its socket file descriptor) is released
    /// when the `CredentialListener` is dropped.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    /// The filesystem path this listener was bound to, when created via
    /// [`bind`](CredentialListener::bind).
    pub fn local_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

// Refuse symlinks so a hostile link cannot redirect the unlink.
fn remove_stale_socket(path: &Path) -> Result<(), BindError> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            return Err(BindError::Symlink {
                socket_path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(BindError::StaleSocket {
                socket_path: path.to_path_buf(),
                source: e,
            });
        }
    }

    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BindError::StaleSocket {
            socket_path: path.to_path_buf(),
            source: e,
        }),
    }
}
