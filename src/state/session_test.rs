use super::*;

fn claims(sub: &str, email: Option<&str>, exp: Option<i64>) -> IdClaims {
    IdClaims { sub: sub.to_owned(), email: email.map(str::to_owned), exp }
}

// =============================================================================
// from_claims
// =============================================================================

#[test]
fn from_claims_prefers_email_for_username() {
    let session = Session::from_claims(claims("u1", Some("e@x.com"), Some(9_999_999_999)), "A".into(), "h.c.s".into());
    assert_eq!(session.username, "e@x.com");
    assert_eq!(session.email.as_deref(), Some("e@x.com"));
    assert_eq!(session.access_token, "A");
    assert_eq!(session.id_token.as_deref(), Some("h.c.s"));
    assert_eq!(session.expires_at_millis(), Some(9_999_999_999_000));
    assert!(session.is_authenticated);
    assert_eq!(session.provider, AuthProvider::Oauth);
}

#[test]
fn from_claims_falls_back_to_sub() {
    let session = Session::from_claims(claims("u1", None, None), "A".into(), "t".into());
    assert_eq!(session.username, "u1");
    assert!(session.email.is_none());
    assert!(session.expires_at.is_none());
}

#[test]
fn from_claims_empty_email_counts_as_absent() {
    let session = Session::from_claims(claims("u1", Some(""), None), "A".into(), "t".into());
    assert_eq!(session.username, "u1");
    assert!(session.email.is_none());
}

#[test]
fn from_claims_out_of_range_exp_has_no_expiry() {
    let session = Session::from_claims(claims("u1", None, Some(i64::MAX)), "A".into(), "t".into());
    assert!(session.expires_at.is_none());
}

// =============================================================================
// is_expired_at
// =============================================================================

#[test]
fn expired_when_expiry_before_now() {
    let session = Session::from_claims(claims("u1", None, Some(1_000)), "A".into(), "t".into());
    assert!(session.is_expired_at(OffsetDateTime::now_utc()));
}

#[test]
fn not_expired_when_expiry_after_now() {
    let session = Session::from_claims(claims("u1", None, Some(9_999_999_999)), "A".into(), "t".into());
    assert!(!session.is_expired_at(OffsetDateTime::now_utc()));
}

#[test]
fn never_expires_without_expiry() {
    let session = Session::from_claims(claims("u1", None, None), "A".into(), "t".into());
    assert!(!session.is_expired_at(OffsetDateTime::now_utc()));
}

// =============================================================================
// serde
// =============================================================================

#[test]
fn serializes_camel_case_fields() {
    let session = Session::from_claims(claims("u1", Some("e@x.com"), Some(0)), "A".into(), "t".into());
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["accessToken"], "A");
    assert_eq!(json["idToken"], "t");
    assert_eq!(json["isAuthenticated"], true);
    assert_eq!(json["provider"], "oauth");
    assert_eq!(json["expiresAt"], "1970-01-01T00:00:00Z");
}

#[test]
fn deserializes_record_without_optional_fields() {
    let raw = r#"{"username":"u1","accessToken":"A","isAuthenticated":true,"provider":"oauth"}"#;
    let session: Session = serde_json::from_str(raw).unwrap();
    assert_eq!(session.username, "u1");
    assert!(session.id_token.is_none());
    assert!(session.expires_at.is_none());
}

#[test]
fn rejects_unknown_provider() {
    let raw = r#"{"username":"u1","accessToken":"A","isAuthenticated":true,"provider":"saml"}"#;
    assert!(serde_json::from_str::<Session>(raw).is_err());
}
