//! Peer credentials and the kernel query that produces them.

use std::fmt;
use std::io;
use std::os::fd::BorrowedFd;

use nix::sys::socket::{getsockopt, sockopt};
use serde::{Deserialize, Serialize};

/// OS identity of the process on the other end of a local-domain connection.
///
/// Captured once per connection, at accept time, from a single kernel query.
/// The kernel vouches for these values; the client application never supplies
/// them. Absent credentials are `Option::None`, never a zeroed triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerCredentials {
    /// Process ID of the peer at the time the connection was accepted.
    pub pid: u32,
    /// Effective user ID of the peer.
    pub uid: u32,
    /// Effective group ID of the peer.
    pub gid: u32,
}

impl fmt::Display for PeerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid={} uid={} gid={}", self.pid, self.uid, self.gid)
    }
}

/// Scoped handle for querying a connected socket's peer credentials.
///
/// Borrows the descriptor for the duration of the query, so it cannot be
/// closed or reused mid-lookup, and consumes itself on use: one handle, one
/// kernel query.
#[derive(Debug)]
pub struct CredentialSource<'a> {
    fd: BorrowedFd<'a>,
}

impl<'a> CredentialSource<'a> {
    /// Create a query handle for a connected local-domain socket descriptor.
    pub fn new(fd: BorrowedFd<'a>) -> Self {
        Self { fd }
    }

    /// Ask the kernel for the peer's credentials.
    ///
    /// Issues exactly one `getsockopt(SOL_SOCKET, SO_PEERCRED)`. The query
    /// must happen before the peer process can exit or its pid be recycled,
    /// which in practice means at accept time.
    pub fn query(self) -> io::Result<PeerCredentials> {
        let creds = getsockopt(&self.fd, sockopt::PeerCredentials).map_err(io::Error::from)?;
        Ok(PeerCredentials {
            // pid_t is signed, but a connected peer's pid is always positive.
            pid: creds.pid() as u32,
            uid: creds.uid(),
            gid: creds.gid(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::fd::AsFd;

    #[test]
    fn socketpair_reports_this_process() {
        let (left, _right) = std::os::unix::net::UnixStream::pair().unwrap();
        let creds = CredentialSource::new(left.as_fd()).query().unwrap();
        assert_eq!(creds.pid, std::process::id());
        assert_eq!(creds.uid, nix::unistd::getuid().as_raw());
        assert_eq!(creds.gid, nix::unistd::getgid().as_raw());
    }

    #[test]
    fn query_on_a_non_socket_descriptor_fails() {
        let file = std::fs::File::open("/dev/null").unwrap();
        let result = CredentialSource::new(file.as_fd()).query();
        assert!(result.is_err());
    }

    #[test]
    fn display_includes_all_three_ids() {
        let creds = PeerCredentials { pid: 41, uid: 42, gid: 43 };
        assert_eq!(creds.to_string(), "pid=41 uid=42 gid=43");
    }
}
