use super::*;
use crate::util::jwt::IdClaims;

fn session(exp: Option<i64>) -> Session {
    Session::from_claims(IdClaims { sub: "u1".to_owned(), email: None, exp }, "A".to_owned(), "t".to_owned())
}

#[test]
fn expiry_label_formats_rfc3339() {
    assert_eq!(expiry_label(&session(Some(0))), "Session expires 1970-01-01T00:00:00Z");
}

#[test]
fn expiry_label_without_expiry() {
    assert_eq!(expiry_label(&session(None)), "Session does not expire");
}
