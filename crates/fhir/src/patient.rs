//! FHIR-aligned Patient wire models.
//!
//! Responsibilities:
//! - Define the nested `Patient` structure exchanged on the wire
//! - Define the coded vocabularies (name use, contact point system/use, narrative status)
//! - Provide small constructors used by the forward mapping
//!
//! Notes:
//! - Decoding is deliberately tolerant: sequences default to empty and `meta`, `text`,
//!   `active` and `id` are optional, so partial resources from other producers decode and
//!   are judged by the inverse mapping instead of the codec.
//! - Elements this crate does not model are ignored on decode.
//! - Coded fields stay as strings on the wire; the enums below supply the canonical codes.
//! - `null` items in string lists (allowed when a `_given`-style extension carries the
//!   data) decode as `""` so positions are preserved.

use crate::constants::{INITIAL_VERSION_ID, PATIENT_RESOURCE_TYPE};
use bridge_types::NonEmptyText;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Coded vocabularies
// ============================================================================

/// Purpose of a human name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameUse {
    Official,
    Usual,
    Temp,
    Nickname,
    Anonymous,
    Old,
    Maiden,
}

impl NameUse {
    /// FHIR wire code.
    pub fn as_str(self) -> &'static str {
        match self {
            NameUse::Official => "official",
            NameUse::Usual => "usual",
            NameUse::Temp => "temp",
            NameUse::Nickname => "nickname",
            NameUse::Anonymous => "anonymous",
            NameUse::Old => "old",
            NameUse::Maiden => "maiden",
        }
    }
}

/// Telecommunications form of a contact point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactPointSystem {
    Phone,
    Fax,
    Email,
    Pager,
    Url,
    Sms,
    Other,
}

impl ContactPointSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactPointSystem::Phone => "phone",
            ContactPointSystem::Fax => "fax",
            ContactPointSystem::Email => "email",
            ContactPointSystem::Pager => "pager",
            ContactPointSystem::Url => "url",
            ContactPointSystem::Sms => "sms",
            ContactPointSystem::Other => "other",
        }
    }
}

/// Use-qualifier of a contact point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactPointUse {
    Home,
    Work,
    Temp,
    Old,
    Mobile,
}

impl ContactPointUse {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactPointUse::Home => "home",
            ContactPointUse::Work => "work",
            ContactPointUse::Temp => "temp",
            ContactPointUse::Old => "old",
            ContactPointUse::Mobile => "mobile",
        }
    }
}

/// Status of a resource narrative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStatus {
    /// Narrative is produced entirely from the structured data.
    Generated,
    Extensions,
    Additional,
    Empty,
}

// ============================================================================
// Wire types
// ============================================================================

/// Wire representation of a Patient resource.
///
/// Field order follows the FHIR element order so encoded output reads naturally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientResource {
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NonEmptyText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
}

impl Default for PatientResource {
    fn default() -> Self {
        Self {
            resource_type: PATIENT_RESOURCE_TYPE.to_string(),
            id: None,
            meta: None,
            text: None,
            identifier: Vec::new(),
            active: None,
            name: Vec::new(),
            telecom: Vec::new(),
            gender: None,
            birth_date: None,
            address: Vec::new(),
        }
    }
}

impl PatientResource {
    /// The resource id as a string slice, if present.
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().map(NonEmptyText::as_str)
    }
}

/// Resource metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<VersionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Meta {
    /// Metadata for a freshly mapped resource: version 1, stamped at `now`.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            version_id: Some(VersionId::Number(INITIAL_VERSION_ID)),
            last_updated: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// `lastUpdated` parsed as a UTC timestamp, if present and well formed.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// `meta.versionId` as found on the wire.
///
/// The bridge writes numeric versions. Other servers may send any FHIR `id` string, which
/// is kept verbatim rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VersionId {
    Number(u32),
    Opaque(String),
}

impl<'de> Deserialize<'de> for VersionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum VersionIdWire {
            Number(u32),
            Text(String),
        }

        Ok(match VersionIdWire::deserialize(deserializer)? {
            VersionIdWire::Number(n) => VersionId::Number(n),
            VersionIdWire::Text(s) => match s.trim().parse::<u32>() {
                Ok(n) => VersionId::Number(n),
                Err(_) => VersionId::Opaque(s),
            },
        })
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionId::Number(n) => write!(f, "{n}"),
            VersionId::Opaque(s) => f.write_str(s),
        }
    }
}

/// String list whose items may be `null`; each `null` reads as `""`.
fn nullable_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Human-readable narrative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub status: NarrativeStatus,
    pub div: String,
}

/// Wire representation of a human name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(
        default,
        deserialize_with = "nullable_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub given: Vec<String>,

    #[serde(
        default,
        deserialize_with = "nullable_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub prefix: Vec<String>,

    #[serde(
        default,
        deserialize_with = "nullable_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub suffix: Vec<String>,
}

/// Wire representation of a postal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(
        default,
        deserialize_with = "nullable_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub line: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Wire representation of a telecom contact point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ContactPoint {
    pub fn new(system: ContactPointSystem, use_type: ContactPointUse, value: &str) -> Self {
        Self {
            system: Some(system.as_str().to_string()),
            use_type: Some(use_type.as_str().to_string()),
            value: Some(value.to_string()),
        }
    }
}

/// Wire representation of a business identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Identifier {
    pub fn new(system: &str, value: &str) -> Self {
        Self {
            use_type: None,
            system: Some(system.to_string()),
            value: Some(value.to_string()),
        }
    }
}
