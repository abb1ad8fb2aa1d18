//! Check-config parsing and validation.
//!
//! The check-config is a JSON array of rule templates handed over as a
//! single flag/env value. Malformed JSON or an invalid template is a
//! fatal configuration error: nothing is evaluated from a config that
//! did not parse in full.

use std::collections::HashSet;

use tracing::warn;

use crate::template::CheckTemplate;

/// Errors that can occur while loading rule templates.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The check-config string is not a valid JSON array of templates.
    #[error("check-config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A template is structurally valid JSON but unusable.
    #[error("invalid rule template: {0}")]
    Validation(String),
}

/// Parse the check-config JSON into rule templates.
///
/// Every template must carry a non-empty `name` (it feeds generated
/// check names). Duplicate names are tolerated but logged, since the
/// later rule's synthesized check silently overwrites the earlier
/// one's on the backend.
pub fn parse_check_config(config: &str) -> Result<Vec<CheckTemplate>, RuleError> {
    let templates: Vec<CheckTemplate> = serde_json::from_str(config)?;

    let mut seen = HashSet::new();
    for (index, template) in templates.iter().enumerate() {
        if template.name.is_empty() {
            return Err(RuleError::Validation(format!(
                "template at index {index} has no name"
            )));
        }
        if !seen.insert(template.name.as_str()) {
            warn!(
                rule = %template.name,
                "duplicate rule name in check-config; later synthesized checks overwrite earlier ones"
            );
        }
    }

    Ok(templates)
}
