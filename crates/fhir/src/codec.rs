//! Textual wire forms for Patient resources.
//!
//! JSON is the interchange format; YAML is supported for on-disk fixtures and review.
//! Decoding goes through `serde_path_to_error` so a schema mismatch names the failing
//! element (for example `name[0].given`).

use crate::constants::PATIENT_RESOURCE_TYPE;
use crate::patient::PatientResource;
use crate::{FhirError, FhirResult};
use std::fmt;
use std::str::FromStr;

/// Wire encoding of a resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WireFormat {
    #[default]
    Json,
    Yaml,
}

impl WireFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            WireFormat::Json => "json",
            WireFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireFormat {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(WireFormat::Json),
            "yaml" | "yml" => Ok(WireFormat::Yaml),
            other => Err(FhirError::InvalidInput(format!(
                "unknown wire format '{other}' (expected json or yaml)"
            ))),
        }
    }
}

/// Encodes `resource` in `format`. `pretty` only affects JSON; YAML is always block style.
///
/// # Errors
///
/// Returns [`FhirError`] if serialisation fails.
pub fn encode(resource: &PatientResource, format: WireFormat, pretty: bool) -> FhirResult<String> {
    let text = match format {
        WireFormat::Json if pretty => serde_json::to_string_pretty(resource)?,
        WireFormat::Json => serde_json::to_string(resource)?,
        WireFormat::Yaml => serde_yaml::to_string(resource)?,
    };
    Ok(text)
}

/// Decodes a Patient resource from `text`.
///
/// # Errors
///
/// Returns [`FhirError::Translation`] if the text does not match the wire schema (the
/// message names the failing path), or [`FhirError::InvalidInput`] if `resourceType` is
/// not `Patient`.
pub fn decode(text: &str, format: WireFormat) -> FhirResult<PatientResource> {
    let resource = match format {
        WireFormat::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(text);
            let resource = serde_path_to_error::deserialize::<_, PatientResource>(&mut deserializer)
                .map_err(schema_mismatch)?;
            deserializer.end()?;
            resource
        }
        WireFormat::Yaml => {
            let deserializer = serde_yaml::Deserializer::from_str(text);
            serde_path_to_error::deserialize::<_, PatientResource>(deserializer)
                .map_err(schema_mismatch)?
        }
    };

    if resource.resource_type != PATIENT_RESOURCE_TYPE {
        return Err(FhirError::InvalidInput(format!(
            "Expected resourceType '{PATIENT_RESOURCE_TYPE}', got '{}'",
            resource.resource_type
        )));
    }

    Ok(resource)
}

fn schema_mismatch<E: fmt::Display>(err: serde_path_to_error::Error<E>) -> FhirError {
    let path = err.path().to_string();
    let path = if path.is_empty() || path == "." {
        "<root>".to_string()
    } else {
        path
    };
    FhirError::Translation(format!(
        "Patient schema mismatch at {path}: {}",
        err.into_inner()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn parses_format_names() {
        assert_eq!("json".parse::<WireFormat>().unwrap(), WireFormat::Json);
        assert_eq!(" YAML ".parse::<WireFormat>().unwrap(), WireFormat::Yaml);
        assert_eq!("yml".parse::<WireFormat>().unwrap(), WireFormat::Yaml);
        match "xml".parse::<WireFormat>() {
            Err(FhirError::InvalidInput(msg)) => assert!(msg.contains("xml")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn decodes_sample_json() {
        let resource = decode(fixtures::SAMPLE_PATIENT_JSON, WireFormat::Json).expect("decode");
        assert_eq!(resource.id_str(), Some("example-patient"));
        assert_eq!(resource.name.len(), 1);
        assert_eq!(resource.telecom.len(), 4);
        assert_eq!(resource.birth_date.as_deref(), Some("1970-09-13"));
    }

    #[test]
    fn json_and_yaml_decode_to_the_same_resource() {
        let from_json = decode(fixtures::SAMPLE_PATIENT_JSON, WireFormat::Json).expect("json");
        let yaml = encode(&from_json, WireFormat::Yaml, false).expect("encode yaml");
        let from_yaml = decode(&yaml, WireFormat::Yaml).expect("yaml");
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn pretty_json_is_multiline() {
        let resource = decode(fixtures::SAMPLE_PATIENT_JSON, WireFormat::Json).expect("decode");
        let compact = encode(&resource, WireFormat::Json, false).expect("compact");
        let pretty = encode(&resource, WireFormat::Json, true).expect("pretty");
        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert!(compact.starts_with(r#"{"resourceType":"Patient","id":"example-patient""#));
    }

    #[test]
    fn rejects_invalid_resource_type() {
        let input = r#"{"resourceType": "Observation", "id": "obs-1"}"#;
        match decode(input, WireFormat::Json) {
            Err(FhirError::InvalidInput(msg)) => {
                assert!(msg.contains("Patient"));
                assert!(msg.contains("Observation"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn reports_path_of_wrong_type() {
        let input = r#"{"resourceType": "Patient", "name": [{"given": "not_an_array"}]}"#;
        match decode(input, WireFormat::Json) {
            Err(FhirError::Translation(msg)) => assert!(msg.contains("given"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn reports_missing_resource_type() {
        let input = "id: abc\n";
        match decode(input, WireFormat::Yaml) {
            Err(FhirError::Translation(msg)) => assert!(msg.contains("resourceType"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_trailing_json() {
        let input = r#"{"resourceType": "Patient"} {"resourceType": "Patient"}"#;
        assert!(matches!(
            decode(input, WireFormat::Json),
            Err(FhirError::InvalidJson(_))
        ));
    }
}
