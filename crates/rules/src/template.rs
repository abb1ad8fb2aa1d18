//! Declarative rule templates parsed from the check-config JSON.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single rule template: when an event matches, synthesize one
/// diagnostic check from it.
///
/// Templates are immutable once parsed; each is evaluated independently
/// against the same event. Field names follow the config wire format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckTemplate {
    /// Identity suffix used in generated check names.
    pub name: String,

    /// Base command string; rendered argument fragments are appended.
    pub command: String,

    /// Label names extracted positionally, best-effort.
    pub arguments: Vec<String>,

    /// Flag-token → label-name pairs, extracted all-or-nothing.
    /// Insertion order is the render order.
    pub options: IndexMap<String, String>,

    /// Literal flag tokens appended unconditionally when the rule fires.
    pub bool_options: Vec<String>,

    /// All-of equality predicate gating whether the rule fires.
    pub match_labels: HashMap<String, String>,

    /// Exclusion predicates; if any one fully matches, this rule is
    /// skipped.
    pub exclude_labels: Vec<HashMap<String, String>>,

    /// Runtime asset identifiers attached to the synthesized check.
    pub sensu_assets: Vec<String>,

    /// Remediation occurrence thresholds; `[1]` when unset.
    pub occurrences: Vec<u32>,

    /// Remediation severity thresholds; `[2]` when unset.
    pub severities: Vec<u32>,

    /// Whether the synthesized check is scheduled automatically.
    pub publish: bool,

    /// Scheduling interval in seconds; 0 or absent means the default.
    pub interval: u32,

    /// Explicit subscription override for the synthesized check.
    pub subscription: String,

    /// Label name whose resolved value is spliced into the check name.
    pub name_suffix: String,

    /// Label name whose resolved value becomes the proxy entity.
    pub proxy_entity_id: String,

    /// Result handlers; the configured default handler when unset.
    pub sensu_handlers: Vec<String>,
}
