//! Forward and inverse mapping between flat records and Patient resources.
//!
//! Responsibilities:
//! - Project an [`InternalRecord`] into a [`PatientResource`] with exactly one official
//!   name and one address, plus telecom and identifier entries for populated fields
//! - Recover an [`InternalRecord`] from a resource, locating telecom and identifier
//!   entries by their system/use tags
//! - Reject resources that lack the cardinality-one structures the forward mapping
//!   always produces
//!
//! Notes:
//! - Absent and empty record fields are equivalent. Name and address slots are always
//!   written (possibly as `""`); telecom and identifier entries are omitted instead.
//! - When several telecom entries share a tag pair, the first in list order wins.

use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::config::MapperConfig;
use crate::constants::{GIVEN_NAME_SLOTS, PATIENT_RESOURCE_TYPE};
use crate::fields::{FieldPath, FIELD_RULES};
use crate::lookup::{self, Coded};
use crate::narrative;
use crate::patient::{
    Address, ContactPoint, HumanName, Identifier, Meta, NameUse, PatientResource,
};
use crate::{FhirError, FhirResult, MappingError};
use bridge_types::{keys, InternalRecord, NonEmptyText};
use bridge_uuid::ResourceId;
use tracing::{debug, warn};

// ============================================================================
// Public types
// ============================================================================

/// Output form requested from the forward mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputForm {
    /// The resource as a structured value.
    #[default]
    Structured,
    /// The resource encoded in the configured wire format.
    Serialized,
}

/// Result of the forward mapping, in the requested [`OutputForm`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MappedPatient {
    Resource(PatientResource),
    Text(String),
}

impl MappedPatient {
    pub fn into_resource(self) -> Option<PatientResource> {
        match self {
            MappedPatient::Resource(resource) => Some(resource),
            MappedPatient::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            MappedPatient::Text(text) => Some(text),
            MappedPatient::Resource(_) => None,
        }
    }
}

/// Maps patient records to and from Patient resources.
///
/// Holds only read-only configuration and a clock, so one mapper can serve any number of
/// threads.
#[derive(Clone, Debug, Default)]
pub struct PatientMapper<C = SystemClock> {
    config: MapperConfig,
    clock: C,
}

impl PatientMapper<SystemClock> {
    /// A mapper stamping resources with wall-clock time.
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> PatientMapper<C> {
    pub fn with_clock(config: MapperConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Forward
    // ------------------------------------------------------------------------

    /// Maps `record` and returns it in the requested form.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] only when [`OutputForm::Serialized`] is requested and encoding
    /// fails.
    pub fn flatten_to_resource(
        &self,
        record: &InternalRecord,
        form: OutputForm,
    ) -> FhirResult<MappedPatient> {
        match form {
            OutputForm::Structured => Ok(MappedPatient::Resource(self.to_resource(record))),
            OutputForm::Serialized => self.to_text(record).map(MappedPatient::Text),
        }
    }

    /// Maps `record` and encodes the resource using the configured wire format.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if encoding fails.
    pub fn to_text(&self, record: &InternalRecord) -> FhirResult<String> {
        let resource = self.to_resource(record);
        codec::encode(
            &resource,
            self.config.wire_format(),
            self.config.pretty(),
        )
    }

    /// Maps `record` to a Patient resource.
    ///
    /// Every call stamps `meta` afresh (version 1, current time), marks the resource
    /// active and regenerates the narrative.
    pub fn to_resource(&self, record: &InternalRecord) -> PatientResource {
        let id = self.resource_id(record);

        let mut name = HumanName {
            use_type: Some(NameUse::Official.as_str().to_string()),
            family: None,
            given: vec![String::new(); GIVEN_NAME_SLOTS],
            prefix: vec![String::new()],
            suffix: Vec::new(),
        };
        let mut address = Address {
            line: vec![String::new()],
            ..Address::default()
        };
        let mut resource = PatientResource {
            id: Some(NonEmptyText::from(id)),
            meta: Some(Meta::fresh(self.clock.now())),
            active: Some(true),
            ..PatientResource::default()
        };

        for rule in FIELD_RULES {
            let value = record.get(rule.key);
            if value.is_empty() && rule.path.is_optional_entry() {
                continue;
            }
            match rule.path {
                FieldPath::NamePrefix => set_slot(&mut name.prefix, 0, value),
                FieldPath::NameGiven(index) => set_slot(&mut name.given, index, value),
                FieldPath::NameFamily => name.family = non_empty(value),
                FieldPath::AddressLine => set_slot(&mut address.line, 0, value),
                FieldPath::AddressCity => address.city = non_empty(value),
                FieldPath::AddressState => address.state = non_empty(value),
                FieldPath::AddressPostalCode => address.postal_code = non_empty(value),
                FieldPath::Telecom { system, use_type } => resource
                    .telecom
                    .push(ContactPoint::new(system, use_type, value)),
                FieldPath::Identifier { system } => {
                    resource.identifier.push(Identifier::new(system, value))
                }
                FieldPath::BirthDate => resource.birth_date = non_empty(value),
                FieldPath::Gender => resource.gender = non_empty(value),
            }
        }

        resource.name = vec![name];
        resource.address = vec![address];
        resource.text = Some(narrative::generate(&resource));

        debug!(
            id = %id,
            telecom = resource.telecom.len(),
            identifiers = resource.identifier.len(),
            "mapped record to Patient resource"
        );

        resource
    }

    /// Resource id for `record`.
    ///
    /// - a `uuid` field holding any UUID spelling is used as-is (canonicalised)
    /// - otherwise a non-empty `pid` yields a name-based id in the configured namespace
    /// - otherwise the record's full field listing does
    ///
    /// The result depends only on the record and the configured namespace.
    pub fn resource_id(&self, record: &InternalRecord) -> ResourceId {
        if let Some(raw) = record.field(keys::UUID) {
            match ResourceId::normalise(raw) {
                Ok(id) => return id,
                Err(err) => debug!(error = %err, "record uuid unusable, deriving resource id"),
            }
        }

        let name = match record.field(keys::PID) {
            Some(pid) => format!("pid:{pid}"),
            None => canonical_listing(record),
        };
        ResourceId::derive(self.config.id_namespace(), &name)
    }

    // ------------------------------------------------------------------------
    // Inverse
    // ------------------------------------------------------------------------

    /// Decodes `text` in the configured wire format and flattens the resource.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if decoding fails or the resource is structurally unusable.
    pub fn text_to_flatten(&self, text: &str) -> FhirResult<InternalRecord> {
        let resource = codec::decode(text, self.config.wire_format())?;
        self.resource_to_flatten(&resource)
    }

    /// Flattens `resource` into a record.
    ///
    /// Every mapped key is present in the result; fields with no source element are `""`.
    /// The resource id, when present, is returned under `uuid`.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidInput`] if `resourceType` is not `Patient`, or
    /// [`FhirError::Mapping`] if the name or address structure is missing or too short.
    /// No partial record is returned.
    pub fn resource_to_flatten(&self, resource: &PatientResource) -> FhirResult<InternalRecord> {
        if resource.resource_type != PATIENT_RESOURCE_TYPE {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType '{PATIENT_RESOURCE_TYPE}', got '{}'",
                resource.resource_type
            )));
        }

        let (name, address) = required_parts(resource).map_err(|err| {
            warn!(id = ?resource.id_str(), error = %err, "Patient resource cannot be flattened");
            FhirError::from(err)
        })?;

        let mut record = InternalRecord::new();
        for rule in FIELD_RULES {
            let value = match rule.path {
                FieldPath::NamePrefix => first_or_empty(&name.prefix),
                FieldPath::NameGiven(index) => name.given.get(index).map_or("", String::as_str),
                FieldPath::NameFamily => name.family.as_deref().unwrap_or(""),
                FieldPath::AddressLine => first_or_empty(&address.line),
                FieldPath::AddressCity => address.city.as_deref().unwrap_or(""),
                FieldPath::AddressState => address.state.as_deref().unwrap_or(""),
                FieldPath::AddressPostalCode => address.postal_code.as_deref().unwrap_or(""),
                FieldPath::Telecom { system, use_type } => tagged_value(
                    &resource.telecom,
                    system.as_str(),
                    Some(use_type.as_str()),
                    rule.key,
                ),
                FieldPath::Identifier { system } => {
                    tagged_value(&resource.identifier, system, None, rule.key)
                }
                FieldPath::BirthDate => resource.birth_date.as_deref().unwrap_or(""),
                FieldPath::Gender => resource.gender.as_deref().unwrap_or(""),
            };
            record.insert(rule.key, value);
        }

        if let Some(id) = resource.id_str() {
            record.insert(keys::UUID, id);
        }

        debug!(id = ?resource.id_str(), "flattened Patient resource");
        Ok(record)
    }
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn set_slot(slots: &mut [String], index: usize, value: &str) {
    if let Some(slot) = slots.get_mut(index) {
        value.clone_into(slot);
    }
}

fn first_or_empty(values: &[String]) -> &str {
    values.first().map_or("", String::as_str)
}

/// `key=value` lines in key order; the name for ids of records with no store identifier.
fn canonical_listing(record: &InternalRecord) -> String {
    record
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The official name and address, checked against the shape the forward mapping produces.
fn required_parts(resource: &PatientResource) -> Result<(&HumanName, &Address), MappingError> {
    let name = resource.name.first().ok_or(MappingError::MissingName)?;
    if name.prefix.is_empty() {
        return Err(MappingError::MissingPrefix);
    }
    if name.given.len() < GIVEN_NAME_SLOTS {
        return Err(MappingError::InsufficientGivenNames {
            found: name.given.len(),
            expected: GIVEN_NAME_SLOTS,
        });
    }

    let address = resource.address.first().ok_or(MappingError::MissingAddress)?;
    if address.line.is_empty() {
        return Err(MappingError::MissingAddressLine);
    }

    Ok((name, address))
}

fn tagged_value<'a, T: Coded>(
    entries: &'a [T],
    system: &'a str,
    use_code: Option<&'a str>,
    key: &str,
) -> &'a str {
    let (value, matches) = lookup::first_value(entries, system, use_code);
    if matches > 1 {
        debug!(
            field = key,
            system,
            use_code = ?use_code,
            matches,
            "several entries match, using the first"
        );
    }
    value.unwrap_or("")
}
