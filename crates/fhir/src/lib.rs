//! FHIR Patient mapping for the patient bridge.
//!
//! This crate translates between the flat patient record kept by the records store
//! ([`InternalRecord`]) and a FHIR-aligned `Patient` resource ([`PatientResource`]):
//! - forward: flat record to nested resource, optionally encoded as JSON or YAML
//! - inverse: nested resource (already decoded) back to a flat record
//!
//! Both directions are driven by a single field table ([`fields::FIELD_RULES`]), so a field
//! added in one direction is added in the other. Repeated coded entries (telecom,
//! identifier) are always located by their system/use tags, never by position.
//!
//! The crate does no I/O. Mapping calls are synchronous and stateless apart from reading
//! the mapper's [`Clock`], so a single [`PatientMapper`] can be shared across threads.

pub mod clock;
pub mod codec;
pub mod config;
pub mod constants;
pub mod fields;
pub mod lookup;
pub mod mapper;
pub mod narrative;
pub mod patient;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export facades
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::WireFormat;
pub use config::MapperConfig;
pub use mapper::{MappedPatient, OutputForm, PatientMapper};

// Re-export wire-level types
pub use patient::{
    Address, ContactPoint, ContactPointSystem, ContactPointUse, HumanName, Identifier, Meta,
    NameUse, Narrative, NarrativeStatus, PatientResource, VersionId,
};

pub use bridge_types::{keys, InternalRecord, NonEmptyText};
pub use bridge_uuid::ResourceId;

/// Structural problems found when flattening a resource.
///
/// These mean the resource does not have the shape the forward mapping always produces
/// (one name with a prefix and two given names, one address with a line). They are never
/// defaulted away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("resource has no name entry")]
    MissingName,

    #[error("name has no prefix element")]
    MissingPrefix,

    #[error("name has {found} given element(s), expected at least {expected}")]
    InsufficientGivenNames { found: usize, expected: usize },

    #[error("resource has no address entry")]
    MissingAddress,

    #[error("address has no line element")]
    MissingAddressLine,
}

/// Errors returned by the `fhir` crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
