//! Build/verify round trips and the wire format

mod common;

use chrono::{Duration, Utc};
use common::*;
use cryypt_token::{
    Claims, Cryypt, Header, TokenBuilder, TokenConfig, TokenSegments, TokenVerifier, codec,
    config::DEFAULT_ALGORITHM, keys,
};
use std::collections::HashMap;

#[test]
fn test_subject_only_round_trip() {
    let claims = Claims::from_iter([("sub", "alice")]);
    let key = signing_key_a();

    let token = TokenBuilder::new(TokenConfig::default())
        .build(&claims, &key)
        .expect("build should succeed");
    let verified = TokenVerifier::new(TokenConfig::default())
        .verify(token.as_str(), &verifying_key_a())
        .expect("verify should succeed");

    assert_eq!(verified, claims);
    assert_eq!(verified.get("sub"), Some("alice"));
}

#[test]
fn test_future_expiry_round_trip() {
    let claims = Claims::builder()
        .subject("alice")
        .issuer("cryypt")
        .expires_in(Duration::hours(1))
        .issued_now()
        .claim("role", "admin")
        .build();

    let token = TokenBuilder::new(TokenConfig::default())
        .build(&claims, &signing_key_a())
        .expect("build should succeed");
    let verified = TokenVerifier::new(TokenConfig::default())
        .verify(token.as_str(), &verifying_key_a())
        .expect("unexpired token should verify");

    assert_eq!(verified, claims);
    assert!(verified.contains_key("exp"));
    assert!(verified.contains_key("iat"));
}

#[test]
fn test_empty_claims_round_trip() {
    let claims = Claims::new();
    let token = TokenBuilder::new(TokenConfig::default())
        .build(&claims, &signing_key_a())
        .expect("build should succeed");
    let segments = token.segments().expect("own tokens split cleanly");
    assert_eq!(segments.payload, codec::encode(b"{}"));

    let verified = TokenVerifier::new(TokenConfig::default())
        .verify(token.as_str(), &verifying_key_a())
        .expect("verify should succeed");
    assert!(verified.is_empty());
}

#[test]
fn test_wire_format_segments() {
    let claims = Claims::from_iter([("sub", "alice"), ("role", "admin")]);
    let token = TokenBuilder::new(TokenConfig::default())
        .build(&claims, &signing_key_a())
        .expect("build should succeed");

    let segments = TokenSegments::split(token.as_str()).expect("three segments");

    let header = codec::decode(segments.header).expect("header is base64");
    assert_eq!(header, br#"{"alg":"P256-with-SHA256","typ":"JWT"}"#);

    // Keys are serialized in lexicographic order
    let payload = codec::decode(segments.payload).expect("payload is base64");
    assert_eq!(payload, br#"{"role":"admin","sub":"alice"}"#);

    assert!(
        segments
            .signature
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    );
    assert_eq!(segments.signature.len() % 2, 0);
}

#[test]
fn test_content_segments_independent_of_insertion_order() {
    let mut forward = HashMap::new();
    forward.insert("a".to_string(), "1".to_string());
    forward.insert("b".to_string(), "2".to_string());
    forward.insert("c".to_string(), "3".to_string());

    let reversed: Claims = [("c", "3"), ("b", "2"), ("a", "1")].into_iter().collect();

    let builder = TokenBuilder::new(TokenConfig::default());
    let key = signing_key_a();
    let t1 = builder.build(&Claims::from(forward), &key).expect("build");
    let t2 = builder.build(&reversed, &key).expect("build");

    let s1 = t1.segments().expect("split");
    let s2 = t2.segments().expect("split");
    assert_eq!(s1.header, s2.header);
    assert_eq!(s1.payload, s2.payload);
}

#[test]
fn test_token_from_independent_implementation_verifies() {
    let verified = TokenVerifier::new(TokenConfig::default())
        .verify(FOREIGN_TOKEN_A, &verifying_key_a())
        .expect("foreign token should verify");
    assert_eq!(verified.get("sub"), Some("alice"));
    assert_eq!(verified.get("role"), Some("admin"));

    // Our own content segments are byte-identical to the foreign ones
    let claims = Claims::from_iter([("sub", "alice"), ("role", "admin")]);
    let ours = TokenBuilder::new(TokenConfig::default())
        .build(&claims, &signing_key_a())
        .expect("build");
    let theirs = TokenSegments::split(FOREIGN_TOKEN_A).expect("split");
    let ours = ours.segments().expect("split");
    assert_eq!(ours.header, theirs.header);
    assert_eq!(ours.payload, theirs.payload);
}

#[test]
fn test_unicode_and_reserved_characters_survive() {
    let claims = Claims::from_iter([
        ("name", "甲乙丙"),
        ("path", "a.b.c"),
        ("quote", "\"quoted\" \\ slash"),
        ("empty", ""),
    ]);
    let token = TokenBuilder::new(TokenConfig::default())
        .build(&claims, &signing_key_a())
        .expect("build");
    assert_eq!(token.as_str().matches('.').count(), 2);

    let verified = TokenVerifier::new(TokenConfig::default())
        .verify(token.as_str(), &verifying_key_a())
        .expect("verify");
    assert_eq!(verified, claims);
}

#[test]
fn test_custom_identifiers_round_trip() {
    let config = TokenConfig::new("P256-with-SHA256", "session").expect("valid config");
    let claims = Claims::from_iter([("sub", "bob")]);

    let token = TokenBuilder::new(config.clone())
        .build(&claims, &signing_key_b())
        .expect("build");
    let header = codec::decode(token.segments().expect("split").header).expect("base64");
    assert_eq!(
        Header::from_json(&header).expect("header json"),
        Header::new(DEFAULT_ALGORITHM, "session")
    );

    let verified = TokenVerifier::new(config)
        .verify(token.as_str(), &verifying_key_b())
        .expect("verify");
    assert_eq!(verified, claims);
}

#[test]
fn test_parsed_keys_interoperate() {
    let pem_signer =
        keys::signing_key_from_bytes(PRIVATE_A_PEM.as_bytes()).expect("PKCS8 PEM parses");
    let raw_signer = keys::signing_key_from_bytes(&SCALAR_A).expect("raw scalar parses");
    assert_eq!(pem_signer, raw_signer);

    let claims = Claims::from_iter([("sub", "alice")]);
    let token = TokenBuilder::new(TokenConfig::default())
        .build(&claims, &pem_signer)
        .expect("build");

    let verifier = TokenVerifier::new(TokenConfig::default());
    for public in [
        PUBLIC_A_PEM.as_bytes(),
        &PUBLIC_A_SEC1[..],
        &PUBLIC_A_COMPRESSED[..],
    ] {
        let key = keys::verifying_key_from_bytes(public).expect("public key parses");
        assert_eq!(
            verifier.verify(token.as_str(), &key).expect("verify"),
            claims
        );
    }
}

#[test]
fn test_invalid_key_bytes_rejected() {
    assert!(matches!(
        keys::signing_key_from_bytes(&[0u8; 31]),
        Err(cryypt_token::TokenError::InvalidKey(_))
    ));
    assert!(matches!(
        keys::signing_key_from_bytes(&[0u8; 32]),
        Err(cryypt_token::TokenError::InvalidKey(_))
    ));
    assert!(matches!(
        keys::verifying_key_from_bytes(&[4u8; 64]),
        Err(cryypt_token::TokenError::InvalidKey(_))
    ));
    assert!(matches!(
        keys::verifying_key_from_bytes(b"-----BEGIN PUBLIC KEY-----\nnope\n-----END PUBLIC KEY-----\n"),
        Err(cryypt_token::TokenError::InvalidKey(_))
    ));
}

#[test]
fn test_entry_points_use_default_config() {
    let claims = Claims::from_iter([("sub", "alice")]);
    let token = Cryypt::token_builder()
        .build(&claims, &signing_key_a())
        .expect("build");
    let verified = Cryypt::token_verifier()
        .verify(token.as_str(), &verifying_key_a())
        .expect("verify");
    assert_eq!(verified, claims);

    let at = Utc::now() + Duration::days(365);
    let verified = Cryypt::token_verifier()
        .verify_at(token.as_str(), &verifying_key_a(), at)
        .expect("no exp means no expiry");
    assert_eq!(verified, claims);
}

#[test]
fn test_signing_through_shared_key() {
    let shared = std::sync::Arc::new(signing_key_a());
    let claims = Claims::from_iter([("sub", "alice")]);
    let token = TokenBuilder::new(TokenConfig::default())
        .build(&claims, &shared)
        .expect("Arc<SigningKey> signs");
    let verifier: &dyn cryypt_token::TokenVerifyingKey = &verifying_key_a();
    let verified = TokenVerifier::new(TokenConfig::default())
        .verify(token.as_str(), verifier)
        .expect("dyn verifying key verifies");
    assert_eq!(verified, claims);
}
