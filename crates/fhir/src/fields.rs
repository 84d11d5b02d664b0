//! Field table shared by both mapping directions.
//!
//! Each [`FieldRule`] ties one flat record key to the place it lives in the nested
//! resource. The forward mapping writes every rule; the inverse mapping reads every rule.

use crate::constants::US_SSN_SYSTEM;
use crate::patient::{ContactPointSystem, ContactPointUse};
use bridge_types::keys;

/// Location of a flat field inside a Patient resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldPath {
    /// `name[0].prefix[0]`
    NamePrefix,
    /// `name[0].family`
    NameFamily,
    /// `name[0].given[i]`
    NameGiven(usize),
    /// `address[0].line[0]`
    AddressLine,
    /// `address[0].city`
    AddressCity,
    /// `address[0].state`
    AddressState,
    /// `address[0].postalCode`
    AddressPostalCode,
    /// The telecom entry tagged `(system, use)`. Omitted when the flat value is empty.
    Telecom {
        system: ContactPointSystem,
        use_type: ContactPointUse,
    },
    /// The identifier entry tagged `system`. Omitted when the flat value is empty.
    Identifier { system: &'static str },
    /// `birthDate`
    BirthDate,
    /// `gender`
    Gender,
}

impl FieldPath {
    /// Whether an empty flat value drops the element instead of writing `""`.
    pub fn is_optional_entry(self) -> bool {
        matches!(self, FieldPath::Telecom { .. } | FieldPath::Identifier { .. })
    }
}

/// One flat key and its resource location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub key: &'static str,
    pub path: FieldPath,
}

const fn rule(key: &'static str, path: FieldPath) -> FieldRule {
    FieldRule { key, path }
}

/// Every mapped field, in resource order.
pub const FIELD_RULES: &[FieldRule] = &[
    rule(keys::SS, FieldPath::Identifier { system: US_SSN_SYSTEM }),
    rule(keys::TITLE, FieldPath::NamePrefix),
    rule(keys::FNAME, FieldPath::NameGiven(0)),
    rule(keys::MNAME, FieldPath::NameGiven(1)),
    rule(keys::LNAME, FieldPath::NameFamily),
    rule(
        keys::PHONE_HOME,
        FieldPath::Telecom {
            system: ContactPointSystem::Phone,
            use_type: ContactPointUse::Home,
        },
    ),
    rule(
        keys::PHONE_BIZ,
        FieldPath::Telecom {
            system: ContactPointSystem::Phone,
            use_type: ContactPointUse::Work,
        },
    ),
    rule(
        keys::PHONE_CELL,
        FieldPath::Telecom {
            system: ContactPointSystem::Phone,
            use_type: ContactPointUse::Mobile,
        },
    ),
    rule(
        keys::EMAIL,
        FieldPath::Telecom {
            system: ContactPointSystem::Email,
            use_type: ContactPointUse::Home,
        },
    ),
    rule(keys::SEX, FieldPath::Gender),
    rule(keys::DOB, FieldPath::BirthDate),
    rule(keys::STREET, FieldPath::AddressLine),
    rule(keys::CITY, FieldPath::AddressCity),
    rule(keys::STATE, FieldPath::AddressState),
    rule(keys::POSTAL_CODE, FieldPath::AddressPostalCode),
];
