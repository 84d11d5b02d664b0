//! Mapper configuration.
//!
//! Configuration is resolved once at process startup and handed to [`PatientMapper`]. The
//! mapper never reads environment variables itself, so concurrent mapping calls and test
//! harnesses always see the same settings.
//!
//! [`PatientMapper`]: crate::PatientMapper

use crate::codec::WireFormat;
use crate::{FhirError, FhirResult};
use bridge_uuid::{Uuid, DEFAULT_NAMESPACE};

/// Settings shared by every mapping call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapperConfig {
    wire_format: WireFormat,
    pretty: bool,
    id_namespace: Uuid,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            wire_format: WireFormat::Json,
            pretty: false,
            id_namespace: DEFAULT_NAMESPACE,
        }
    }
}

impl MapperConfig {
    /// Create a new `MapperConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidUuid`] if `id_namespace` is the nil UUID, which would
    /// make derived ids collide with other nil-namespace producers.
    pub fn new(wire_format: WireFormat, pretty: bool, id_namespace: Uuid) -> FhirResult<Self> {
        if id_namespace.is_nil() {
            return Err(FhirError::InvalidUuid(
                "id namespace cannot be the nil UUID".into(),
            ));
        }

        Ok(Self {
            wire_format,
            pretty,
            id_namespace,
        })
    }

    /// Build a config from raw environment values, applying defaults for absent ones.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if any present value fails to parse.
    pub fn from_env_values(
        wire_format: Option<String>,
        pretty: Option<String>,
        id_namespace: Option<String>,
    ) -> FhirResult<Self> {
        Self::new(
            wire_format_from_env_value(wire_format)?,
            pretty_from_env_value(pretty)?,
            id_namespace_from_env_value(id_namespace)?,
        )
    }

    pub fn wire_format(&self) -> WireFormat {
        self.wire_format
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn id_namespace(&self) -> &Uuid {
        &self.id_namespace
    }

    pub fn with_wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = wire_format;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the wire format from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns JSON.
pub fn wire_format_from_env_value(value: Option<String>) -> FhirResult<WireFormat> {
    non_blank(value)
        .map(|v| v.parse::<WireFormat>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Parse the pretty-print flag from an optional string value.
///
/// Accepts `true/false`, `1/0`, `yes/no`, `on/off` in any case. Absent means `false`.
pub fn pretty_from_env_value(value: Option<String>) -> FhirResult<bool> {
    let Some(value) = non_blank(value) else {
        return Ok(false);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(FhirError::InvalidInput(format!(
            "invalid boolean '{other}' for pretty-print flag"
        ))),
    }
}

/// Parse the id namespace from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_NAMESPACE`].
pub fn id_namespace_from_env_value(value: Option<String>) -> FhirResult<Uuid> {
    match non_blank(value) {
        None => Ok(DEFAULT_NAMESPACE),
        Some(v) => Uuid::parse_str(&v).map_err(|e| FhirError::InvalidUuid(format!("'{v}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_absent_values() {
        let config = MapperConfig::from_env_values(None, None, None).expect("defaults");
        assert_eq!(config, MapperConfig::default());
        assert_eq!(config.wire_format(), WireFormat::Json);
        assert!(!config.pretty());
        assert_eq!(config.id_namespace(), &DEFAULT_NAMESPACE);
    }

    #[test]
    fn blank_values_count_as_absent() {
        let config = MapperConfig::from_env_values(
            Some("  ".into()),
            Some(String::new()),
            Some("\t".into()),
        )
        .expect("blank");
        assert_eq!(config, MapperConfig::default());
    }

    #[test]
    fn parses_present_values() {
        let config = MapperConfig::from_env_values(
            Some("yaml".into()),
            Some("Yes".into()),
            Some("6ba7b811-9dad-11d1-80b4-00c04fd430c8".into()),
        )
        .expect("valid");
        assert_eq!(config.wire_format(), WireFormat::Yaml);
        assert!(config.pretty());
        assert_eq!(config.id_namespace(), &Uuid::NAMESPACE_URL);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            pretty_from_env_value(Some("maybe".into())),
            Err(FhirError::InvalidInput(_))
        ));
        assert!(matches!(
            id_namespace_from_env_value(Some("not-a-uuid".into())),
            Err(FhirError::InvalidUuid(_))
        ));
        assert!(matches!(
            wire_format_from_env_value(Some("xml".into())),
            Err(FhirError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_nil_namespace() {
        let result = MapperConfig::new(WireFormat::Json, false, Uuid::nil());
        assert!(matches!(result, Err(FhirError::InvalidUuid(_))));
    }

    #[test]
    fn builder_overrides() {
        let config = MapperConfig::default()
            .with_wire_format(WireFormat::Yaml)
            .with_pretty(true);
        assert_eq!(config.wire_format(), WireFormat::Yaml);
        assert!(config.pretty());
    }
}
