//! Token payload: a claim set with the two reserved claims pulled out as
//! typed fields and everything else carried through untouched.
//!
//! - `sub`: stable subject identifier (the user's login key, here the email)
//! - `exp`: absolute expiry, seconds since epoch
//!
//! Application claims (`uid`, `role`, ...) live in the extension map; the
//! core never inspects them. BTreeMap keeps serialization ordering stable so
//! issued tokens are reproducible in tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A claim value: string, integer, or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl From<&str> for ClaimValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for ClaimValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for ClaimValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, ClaimValue>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            sub: Some(subject.into()),
            ..Self::default()
        }
    }

    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Attach a claim. The reserved names route into the typed fields when
    /// the value has the reserved type; everything else goes to the
    /// extension map verbatim.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ClaimValue>) {
        let name = name.into();
        let value = value.into();
        match (name.as_str(), &value) {
            ("sub", ClaimValue::String(s)) => self.sub = Some(s.clone()),
            ("exp", ClaimValue::Integer(n)) => self.exp = Some(*n),
            _ => {
                self.extra.insert(name, value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.extra.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_claims_route_to_typed_fields() {
        let mut claims = ClaimSet::new();
        claims.insert("sub", "alice@example.com");
        claims.insert("exp", 1_700_000_000i64);
        claims.insert("role", "buyer");

        assert_eq!(claims.subject(), Some("alice@example.com"));
        assert_eq!(claims.exp, Some(1_700_000_000));
        assert_eq!(claims.get("role"), Some(&ClaimValue::String("buyer".into())));
        assert!(claims.get("sub").is_none());
    }

    #[test]
    fn test_serde_round_trip_with_extras() {
        let mut claims = ClaimSet::for_subject("alice@example.com");
        claims.exp = Some(123);
        claims.insert("uid", "42");
        claims.insert("admin", false);
        claims.insert("score", 9i64);

        let json = serde_json::to_string(&claims).unwrap();
        let back: ClaimSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn test_serialization_is_stable() {
        let mut claims = ClaimSet::for_subject("a@b.c");
        claims.exp = Some(1);
        claims.insert("z", 1i64);
        claims.insert("a", "x");

        let first = serde_json::to_string(&claims).unwrap();
        let second = serde_json::to_string(&claims).unwrap();
        assert_eq!(first, second);
        // Extension keys come out in map order, after the typed fields.
        assert_eq!(first, r#"{"sub":"a@b.c","exp":1,"a":"x","z":1}"#);
    }

    #[test]
    fn test_absent_reserved_claims_are_omitted() {
        let claims = ClaimSet::new();
        assert_eq!(serde_json::to_string(&claims).unwrap(), "{}");

        let parsed: ClaimSet = serde_json::from_str("{}").unwrap();
        assert!(parsed.sub.is_none());
        assert!(parsed.exp.is_none());
    }

    #[test]
    fn test_rejects_malformed_reserved_types() {
        // `exp` must be an integer once present.
        assert!(serde_json::from_str::<ClaimSet>(r#"{"exp":"soon"}"#).is_err());
        assert!(serde_json::from_str::<ClaimSet>(r#"{"sub":42,"exp":1}"#).is_err());
    }
}
