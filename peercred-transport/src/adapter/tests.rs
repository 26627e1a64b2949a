use super::*;
use peercred_unix::PeerCredentials;

struct Plain;

impl AttachedCredentials for Plain {
    fn attached_credentials(&self) -> Option<PeerCredentials> {
        None
    }
}

struct Identified(PeerCredentials);

impl AttachedCredentials for Identified {
    fn attached_credentials(&self) -> Option<PeerCredentials> {
        Some(self.0)
    }
}

fn creds() -> PeerCredentials {
    PeerCredentials {
        pid: 1234,
        uid: 1000,
        gid: 1000,
    }
}

#[test]
fn server_handshake_publishes_attached_credentials() {
    let transport = CredentialTransport::new();
    let (_stream, auth) = transport.server_handshake(Identified(creds())).unwrap();

    let auth = auth.expect("credentials must be published");
    assert_eq!(auth.auth_type(), "peer-credentials");
    let published = auth.as_any().downcast_ref::<PeerCredentials>().unwrap();
    assert_eq!(*published, creds());
}

#[test]
fn server_handshake_degrades_without_credentials() {
    let transport = CredentialTransport::new();
    let (_stream, auth) = transport.server_handshake(Plain).unwrap();
    assert!(auth.is_none());
}

#[test]
fn client_handshake_always_fails() {
    let transport = CredentialTransport::new();
    assert_eq!(
        transport
            .client_handshake("identified", Identified(creds()))
            .err(),
        Some(HandshakeError::ClientUnsupported)
    );
    assert_eq!(
        transport.client_handshake("", Plain).err(),
        Some(HandshakeError::ClientUnsupported)
    );
}

#[test]
fn protocol_tag_is_not_an_encryption_protocol() {
    let info = CredentialTransport::new().info();
    assert_eq!(info.security_protocol, SECURITY_PROTOCOL);
    assert_ne!(info.security_protocol, "tls");
    assert_ne!(info.security_protocol, "ssl");
}

#[test]
fn clones_are_independent_and_equivalent() {
    let original = CredentialTransport::new();
    let clone = original.clone();

    assert_eq!(original.info(), clone.info());

    let (_s1, a1) = original.server_handshake(Identified(creds())).unwrap();
    let (_s2, a2) = clone.server_handshake(Identified(creds())).unwrap();
    let a1 = a1.unwrap();
    let a2 = a2.unwrap();
    assert_eq!(
        a1.as_any().downcast_ref::<PeerCredentials>(),
        a2.as_any().downcast_ref::<PeerCredentials>()
    );
}

#[test]
fn override_server_name_is_a_no_op() {
    let mut transport = CredentialTransport::new();
    assert!(transport.override_server_name("anything.example").is_ok());

    // Behavior is unchanged afterwards.
    let (_stream, auth) = transport.server_handshake(Identified(creds())).unwrap();
    assert!(auth.is_some());
}
