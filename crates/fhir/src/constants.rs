//! Coded systems and fixed values shared by both mapping directions.

/// `resourceType` of every resource this crate reads or writes.
pub const PATIENT_RESOURCE_TYPE: &str = "Patient";

/// Identifier system for US social security numbers.
pub const US_SSN_SYSTEM: &str = "http://hl7.org/fhir/sid/us-ssn";

/// XHTML namespace required on narrative `div` elements.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Version stamped on every freshly mapped resource.
pub const INITIAL_VERSION_ID: u32 = 1;

/// Number of `given` slots on the official name: first name, then middle name.
pub const GIVEN_NAME_SLOTS: usize = 2;
