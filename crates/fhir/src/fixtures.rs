//! Sample records and resources for tests.

use bridge_types::{keys, InternalRecord};

/// A fully populated flat record.
pub fn sample_record() -> InternalRecord {
    [
        (keys::TITLE, "Mr."),
        (keys::FNAME, "Jason"),
        (keys::MNAME, "Charles"),
        (keys::LNAME, "Bourne"),
        (keys::STREET, "400 West Broadway"),
        (keys::CITY, "Boston"),
        (keys::STATE, "MA"),
        (keys::POSTAL_CODE, "02127"),
        (keys::PHONE_HOME, "617-555-0100"),
        (keys::PHONE_BIZ, "617-555-0101"),
        (keys::PHONE_CELL, "617-555-0102"),
        (keys::EMAIL, "jason.bourne@example.org"),
        (keys::SS, "123-45-6789"),
        (keys::DOB, "1970-09-13"),
        (keys::SEX, "male"),
        (keys::PID, "42"),
    ]
    .into_iter()
    .collect()
}

/// A record with only the name and address populated.
pub fn sparse_record() -> InternalRecord {
    [
        (keys::TITLE, ""),
        (keys::FNAME, "Nicky"),
        (keys::MNAME, ""),
        (keys::LNAME, "Parsons"),
        (keys::STREET, "1 Rue de Rivoli"),
        (keys::CITY, "Paris"),
        (keys::STATE, ""),
        (keys::POSTAL_CODE, "75001"),
        (keys::PHONE_HOME, ""),
        (keys::EMAIL, ""),
    ]
    .into_iter()
    .collect()
}

/// A Patient resource as another producer might send it.
pub const SAMPLE_PATIENT_JSON: &str = r#"{
  "resourceType": "Patient",
  "id": "example-patient",
  "meta": { "versionId": "3", "lastUpdated": "2026-01-23T13:58:04.099Z" },
  "identifier": [
    { "system": "http://hospital.example.org/mrn", "value": "MRN-0042" },
    { "system": "http://hl7.org/fhir/sid/us-ssn", "value": "987-65-4321" }
  ],
  "active": true,
  "name": [
    { "use": "official", "family": "Kreutz", "given": ["Marie", "Helena"], "prefix": ["Dr."] },
    { "use": "nickname", "given": ["Mia"] }
  ],
  "telecom": [
    { "system": "email", "use": "home", "value": "marie@example.org" },
    { "system": "phone", "use": "mobile", "value": "555-0102" },
    { "system": "phone", "use": "work", "value": "555-0101" },
    { "system": "phone", "use": "home", "value": "555-0100" }
  ],
  "gender": "female",
  "birthDate": "1970-09-13",
  "address": [
    { "line": ["12 Harbour Road"], "city": "Portland", "state": "ME", "postalCode": "04101" }
  ]
}"#;
