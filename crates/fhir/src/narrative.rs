//! Generated XHTML narrative for Patient resources.

use crate::constants::XHTML_NAMESPACE;
use crate::patient::{Narrative, NarrativeStatus, PatientResource};
use std::borrow::Cow;

/// Builds a `generated` narrative from the structured content of `resource`.
///
/// Call this after the other elements are filled in. The `div` is never empty: when the
/// resource carries no usable name it falls back to the resource id.
pub fn generate(resource: &PatientResource) -> Narrative {
    Narrative {
        status: NarrativeStatus::Generated,
        div: render_div(resource),
    }
}

fn render_div(resource: &PatientResource) -> String {
    let heading = display_name(resource)
        .or_else(|| resource.id_str().map(|id| format!("Patient {id}")))
        .unwrap_or_else(|| "Unnamed patient".to_string());

    let mut details = Vec::new();
    if let Some(dob) = resource.birth_date.as_deref().filter(|s| !s.is_empty()) {
        details.push(format!("born {}", escape(dob)));
    }
    if let Some(gender) = resource.gender.as_deref().filter(|s| !s.is_empty()) {
        details.push(escape(gender).into_owned());
    }

    let mut div = format!(
        "<div xmlns=\"{XHTML_NAMESPACE}\"><p><b>{}</b></p>",
        escape(&heading)
    );
    if !details.is_empty() {
        div.push_str("<p>");
        div.push_str(&details.join(", "));
        div.push_str("</p>");
    }
    div.push_str("</div>");
    div
}

/// "Prefix Given… Family" from the first name, skipping blank parts.
fn display_name(resource: &PatientResource) -> Option<String> {
    let name = resource.name.first()?;
    let parts: Vec<&str> = name
        .prefix
        .iter()
        .chain(name.given.iter())
        .map(String::as_str)
        .chain(name.family.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Escapes text for inclusion in XHTML element content.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>', '"', '\''][..]) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::HumanName;

    fn named(prefix: &str, given: &[&str], family: &str) -> PatientResource {
        PatientResource {
            name: vec![HumanName {
                use_type: Some("official".into()),
                family: Some(family.into()),
                given: given.iter().map(|s| s.to_string()).collect(),
                prefix: vec![prefix.into()],
                suffix: vec![],
            }],
            ..PatientResource::default()
        }
    }

    #[test]
    fn renders_name_and_details() {
        let mut resource = named("Mr.", &["Jason", "Charles"], "Bourne");
        resource.birth_date = Some("1970-09-13".into());
        resource.gender = Some("male".into());

        let narrative = generate(&resource);
        assert_eq!(narrative.status, NarrativeStatus::Generated);
        assert_eq!(
            narrative.div,
            "<div xmlns=\"http://www.w3.org/1999/xhtml\"><p><b>Mr. Jason Charles Bourne</b></p>\
             <p>born 1970-09-13, male</p></div>"
        );
    }

    #[test]
    fn skips_blank_name_parts() {
        let resource = named("", &["Jason", ""], "Bourne");
        let narrative = generate(&resource);
        assert!(narrative.div.contains("<b>Jason Bourne</b>"));
        assert!(!narrative.div.contains("<p>born"));
    }

    #[test]
    fn falls_back_to_id_then_placeholder() {
        let mut resource = named("", &["", ""], "");
        assert!(generate(&resource).div.contains("<b>Unnamed patient</b>"));

        resource.id = Some("abc123".parse().unwrap());
        assert!(generate(&resource).div.contains("<b>Patient abc123</b>"));
    }

    #[test]
    fn escapes_markup() {
        let resource = named("", &["<script>", ""], "O'Brien & Sons");
        let div = generate(&resource).div;
        assert!(div.contains("&lt;script&gt; O&#39;Brien &amp; Sons"));
        assert!(!div.contains("<script>"));
    }

    #[test]
    fn escape_borrows_when_clean() {
        assert!(matches!(escape("plain text"), Cow::Borrowed(_)));
        assert_eq!(escape("a<b"), "a&lt;b");
    }
}
