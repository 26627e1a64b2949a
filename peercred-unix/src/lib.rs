//! Identify Unix domain socket clients by their OS process credentials.
//!
//! A [`CredentialListener`] wraps socket accept so that every local-domain
//! connection arrives with the pid, uid and gid of the process on the other
//! end, obtained from the kernel (`SO_PEERCRED`) before the connection is
//! handed to anyone. The client needs no changes: the kernel asserts the
//! identity, the peer application never supplies it.
//!
//! ```no_run
//! use peercred_unix::CredentialListener;
//!
//! # async fn serve() -> Result<(), Box<dyn std::error::Error>> {
//! let listener = CredentialListener::bind("/run/myapp/control.sock")?;
//! loop {
//!     let conn = listener.accept().await?;
//!     if let Some(creds) = conn.credentials() {
//!         println!("client pid={} uid={} gid={}", creds.pid, creds.uid, creds.gid);
//!     }
//! }
//! # }
//! ```
//!
//! Transports with no notion of an OS peer still work: their connections are
//! accepted with no credentials attached. A connection whose credential query
//! fails is never handed out, so "no credentials" always means "the transport
//! cannot have them", never "the lookup silently failed".

#[cfg(not(target_os = "linux"))]
compile_error!("peercred-unix relies on SO_PEERCRED and requires a Linux target");

pub mod connection;
pub mod credentials;
pub mod errors;
pub mod listener;
pub mod socket;

pub use connection::CredentialConnection;
pub use credentials::{CredentialSource, PeerCredentials};
pub use errors::{AcceptError, BindError};
pub use listener::{BindOptions, CredentialListener};
pub use socket::{AttachedCredentials, Listener, ServerStream, Socket};
