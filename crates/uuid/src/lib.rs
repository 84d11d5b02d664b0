//! Resource identifier utilities.
//!
//! Patient resources produced by the bridge carry an `id` in a *canonical* UUID form:
//! **32 lowercase hexadecimal characters** (no hyphens). This is a valid FHIR id
//! (`[A-Za-z0-9\-\.]{1,64}`) and is stable across platforms and serialisers.
//!
//! This crate provides [`ResourceId`], a wrapper that guarantees the canonical form once
//! constructed. [`ResourceId::derive`] computes a deterministic id (v5) from a namespace
//! and a name, so the same source record maps to the same resource id every time.
//!
//! ## Canonical UUID form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! [`ResourceId::parse`] accepts only the canonical form. Identifiers supplied by a records
//! store in hyphenated or uppercase form go through [`ResourceId::normalise`].

mod service;

pub use service::{ResourceId, Uuid, DEFAULT_NAMESPACE};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
