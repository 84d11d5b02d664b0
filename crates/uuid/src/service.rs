//! Internal implementation of resource identifiers.

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Namespace used for deterministic ids when no other namespace is configured.
pub const DEFAULT_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2d4e_9a7b_5c3d_8e2f_1a4b_7c9d_0e61);

/// Canonical resource identifier (32 lowercase hex characters, no hyphens).
///
/// Once constructed the contained UUID is always rendered in canonical form, so two ids
/// compare equal exactly when their rendered strings do.
///
/// # Construction
/// - [`ResourceId::derive`] generates a name-based id that is stable for a given
///   namespace and name.
/// - [`ResourceId::parse`] validates an externally supplied canonical id.
/// - [`ResourceId::normalise`] accepts any UUID spelling the `uuid` crate understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Derives a deterministic id from `name` within `namespace` (UUID v5).
    ///
    /// The same `(namespace, name)` pair always yields the same id.
    pub fn derive(namespace: &Uuid, name: &str) -> Self {
        Self(Uuid::new_v5(namespace, name.as_bytes()))
    }

    /// Validates and parses an id that must already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not 32 lowercase hex characters.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 32 lowercase hex characters without hyphens, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("'{}': {}", input, e)))
    }

    /// Parses any UUID spelling (hyphenated, braced, urn, uppercase) into canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not a UUID at all.
    pub fn normalise(input: &str) -> UuidResult<Self> {
        Uuid::parse_str(input.trim())
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("'{}' is not a UUID: {}", input, e)))
    }

    /// Returns the underlying `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if `input` is in canonical form.
    ///
    /// Purely syntactic: exactly 32 bytes, all of them `0-9` or `a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for ResourceId {
    type Err = UuidError;

    /// Equivalent to [`ResourceId::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ResourceId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        let a = ResourceId::derive(&DEFAULT_NAMESPACE, "pid:42");
        let b = ResourceId::derive(&DEFAULT_NAMESPACE, "pid:42");
        assert_eq!(a, b);
        assert!(ResourceId::is_canonical(&a.to_string()));
    }

    #[test]
    fn test_derive_depends_on_name_and_namespace() {
        let a = ResourceId::derive(&DEFAULT_NAMESPACE, "pid:42");
        let b = ResourceId::derive(&DEFAULT_NAMESPACE, "pid:43");
        let c = ResourceId::derive(&Uuid::NAMESPACE_OID, "pid:42");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_valid_canonical_id() {
        let id = ResourceId::parse("550e8400e29b41d4a716446655440000").expect("canonical");
        assert_eq!(id.to_string(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_parse_rejects_hyphenated_id() {
        let result = ResourceId::parse("550e8400-e29b-41d4-a716-446655440000");
        match result {
            Err(UuidError::InvalidInput(msg)) => {
                assert!(msg.contains("32 lowercase hex characters"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_uppercase_and_bad_length() {
        assert!(ResourceId::parse("550E8400E29B41D4A716446655440000").is_err());
        assert!(ResourceId::parse("550e8400e29b41d4a71644665544000").is_err());
        assert!(ResourceId::parse("550e8400e29b41d4a716446655440000a").is_err());
        assert!(ResourceId::parse("550e8400e29b41d4a71644665544000g").is_err());
    }

    #[test]
    fn test_normalise_accepts_other_spellings() {
        let expected = "550e8400e29b41d4a716446655440000";
        for input in [
            "550e8400-e29b-41d4-a716-446655440000",
            "550E8400-E29B-41D4-A716-446655440000",
            "urn:uuid:550e8400-e29b-41d4-a716-446655440000",
            " 550e8400e29b41d4a716446655440000 ",
        ] {
            let id = ResourceId::normalise(input).expect("valid uuid spelling");
            assert_eq!(id.to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_normalise_rejects_non_uuid() {
        match ResourceId::normalise("patient-42") {
            Err(UuidError::InvalidInput(msg)) => assert!(msg.contains("patient-42")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_str_matches_parse() {
        let id: ResourceId = "550e8400e29b41d4a716446655440000".parse().expect("valid");
        assert_eq!(id, ResourceId::parse("550e8400e29b41d4a716446655440000").unwrap());
        assert!("not-a-uuid".parse::<ResourceId>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let id = ResourceId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"550e8400e29b41d4a716446655440000\"");

        let back: ResourceId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, id);

        assert!(serde_json::from_str::<ResourceId>("\"550e8400-e29b-41d4-a716-446655440000\"").is_err());
    }
}
