//! Inbound monitoring event model.
//!
//! Mirrors the backend's core/v2 wire shape: an event carries its own
//! metadata plus the originating entity and the executed check, each
//! with a `metadata` object holding name, namespace, labels, and
//! annotations. Fields this crate does not interpret are captured in
//! flattened maps so a mutated event round-trips losslessly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name, namespace, labels, and annotations shared by events, entities,
/// checks, and synthesized check definitions (wire key: `metadata`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub annotations: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by: String,
}

/// The entity an event originated from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Entity fields not interpreted here (class, system, …), preserved
    /// for round-tripping.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The check execution an event describes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Check {
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Check fields not interpreted here (command, status, output, …),
    /// preserved for round-tripping.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An incoming monitoring event.
///
/// The three label namespaces (event, entity, check) are independent;
/// [`crate::labels`] defines lookup precedence across them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub entity: Entity,

    #[serde(default)]
    pub check: Check,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Namespace the event (and any checks synthesized from it) lives in.
    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    pub fn entity_name(&self) -> &str {
        &self.entity.metadata.name
    }

    pub fn check_name(&self) -> &str {
        &self.check.metadata.name
    }

    /// The three label namespaces in resolution order: event-level first,
    /// then entity-level, then check-level. Later entries shadow earlier
    /// ones during single-label resolution.
    pub fn label_namespaces(&self) -> [&HashMap<String, String>; 3] {
        [
            &self.metadata.labels,
            &self.entity.metadata.labels,
            &self.check.metadata.labels,
        ]
    }

    /// The `entity:<name>` subscription targeting this event's entity.
    pub fn entity_subscription(&self) -> String {
        format!("entity:{}", self.entity_name())
    }
}
