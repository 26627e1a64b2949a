//! CredentialConnection I/O proxying and lifecycle.

use peercred_unix::{AttachedCredentials, CredentialListener};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

async fn accepted_pair(
    sock: &std::path::Path,
) -> (
    peercred_unix::CredentialConnection<UnixStream>,
    UnixStream,
) {
    let listener = CredentialListener::bind(sock).unwrap();
    let connect = tokio::spawn({
        let sock = sock.to_path_buf();
        async move { UnixStream::connect(&sock).await.unwrap() }
    });
    let conn = listener.accept().await.unwrap();
    let client = connect.await.unwrap();
    (conn, client)
}

#[tokio::test]
async fn connection_proxies_bytes_both_ways() {
    let tmp = tempfile::tempdir().unwrap();
    let (mut conn, mut client) = accepted_pair(&tmp.path().join("io.sock")).await;

    client.write_all(b"ping").await.unwrap();
    let mut buf = [0u8; 4];
    conn.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"ping");

    conn.write_all(b"pong").await.unwrap();
    let mut buf = [0u8; 4];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"pong");
}

#[tokio::test]
async fn shutdown_twice_is_safe() {
    let tmp = tempfile::tempdir().unwrap();
    let (mut conn, mut client) = accepted_pair(&tmp.path().join("shutdown.sock")).await;

    conn.shutdown().await.unwrap();
    conn.shutdown().await.unwrap();

    // The client observes a clean EOF.
    let mut buf = Vec::new();
    client.read_to_end(&mut buf).await.unwrap();
    assert!(buf.is_empty());
}

#[tokio::test]
async fn into_inner_yields_a_usable_stream() {
    let tmp = tempfile::tempdir().unwrap();
    let (conn, mut client) = accepted_pair(&tmp.path().join("unwrap.sock")).await;

    let mut stream = conn.into_inner();
    stream.write_all(b"raw").await.unwrap();

    let mut buf = [0u8; 3];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"raw");
}

#[tokio::test]
async fn accept_stream_keeps_credentials_reachable() {
    let tmp = tempfile::tempdir().unwrap();
    let sock = tmp.path().join("stream.sock");
    let listener = CredentialListener::bind(&sock).unwrap();

    let connect = tokio::spawn(async move { UnixStream::connect(&sock).await.unwrap() });

    let stream = listener.accept_stream().await.unwrap();
    let creds = stream
        .attached_credentials()
        .expect("credentials must survive the byte-stream projection");
    assert_eq!(creds.uid, nix::unistd::getuid().as_raw());

    let _client = connect.await.unwrap();
}
