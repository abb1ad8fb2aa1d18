//! Outbound check definition and remediation descriptor models.
//!
//! [`CheckDefinition`] is the core/v2 check payload registered against
//! the backend; [`RemediationAction`] is the annotation element the
//! remediation handler consumes downstream.

use serde::{Deserialize, Serialize};

use crate::event::ObjectMeta;

/// Identity recorded on every synthesized check, both as an ownership
/// label and as the `created_by` field.
pub const PLUGIN_NAME: &str = "checkforge-mutator";

/// Annotation key the aggregated remediation actions are written under.
pub const REMEDIATION_ANNOTATION_KEY: &str = "io.sensu.remediation.config.actions";

/// Check timeout applied to every synthesized check, in seconds.
pub const CHECK_TIMEOUT_SECS: u32 = 10;

/// A core/v2 check definition, ready to be upserted into the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDefinition {
    pub metadata: ObjectMeta,

    pub command: String,

    pub subscriptions: Vec<String>,

    pub interval: u32,

    pub publish: bool,

    pub timeout: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runtime_assets: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<String>,

    /// Alternate identity the check reports under. Empty means the check
    /// runs under the subscribing entity itself.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub proxy_entity_name: String,
}

impl CheckDefinition {
    /// Ownership metadata for a synthesized check: the plugin name as a
    /// label (valued `"owner"`) and as `created_by`.
    pub fn owned_metadata(name: String, namespace: String) -> ObjectMeta {
        ObjectMeta {
            name,
            namespace,
            labels: [(PLUGIN_NAME.to_string(), "owner".to_string())]
                .into_iter()
                .collect(),
            annotations: Default::default(),
            created_by: PLUGIN_NAME.to_string(),
        }
    }
}

/// A follow-up action descriptor tied to repeated failures of a
/// synthesized (non-published) check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationAction {
    /// Name of the check to request when thresholds are met.
    pub request: String,

    /// Occurrence counts that trigger the action.
    pub occurrences: Vec<u32>,

    /// Severities the action applies to.
    pub severities: Vec<u32>,

    /// Subscriptions the triggered request is published to; always the
    /// `entity:` subscription of the originating event.
    pub subscriptions: Vec<String>,
}
