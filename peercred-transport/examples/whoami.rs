//! Minimal end-to-end wiring: a server that answers each caller with its own
//! OS identity, demonstrated between two tasks in one process.

use peercred_transport::{
    CredentialTransport, Peer, RequestContext, TransportCredentials, peer_credentials,
};
use peercred_unix::CredentialListener;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("whoami.sock");

    let listener = CredentialListener::bind(&path)?;

    let client = tokio::spawn({
        let path = path.clone();
        async move {
            let mut stream = UnixStream::connect(&path).await?;
            let mut reply = String::new();
            stream.read_to_string(&mut reply).await?;
            Ok::<_, std::io::Error>(reply)
        }
    });

    // Accept and run the credential handshake the way an RPC server would.
    let conn = listener.accept().await?;
    let transport = CredentialTransport::new();
    let (mut conn, auth_info) = transport.server_handshake(conn)?;

    // The framework would attach this to every request on the connection.
    let cx = RequestContext::with_peer(Peer::new(auth_info));

    // Handler role: read the caller's identity from the request context.
    let creds = peer_credentials(&cx)?;
    conn.write_all(format!("you are {creds}\n").as_bytes())
        .await?;
    conn.shutdown().await?;

    print!("{}", client.await??);
    Ok(())
}
