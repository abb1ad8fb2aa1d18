//! The event-mutation pipeline.
//!
//! Rules are processed one at a time in template order; each firing
//! rule blocks on a full authenticate + PUT round trip before the next
//! rule begins. Backend failures are fatal to the whole run; checks
//! already registered by earlier rules are not rolled back.

use tracing::{debug, info};

use checkforge_backend::{BackendClient, BackendError, Credential};
use checkforge_core::{Event, RemediationAction, REMEDIATION_ANNOTATION_KEY};

use crate::evaluator::RuleEvaluator;
use crate::template::CheckTemplate;

/// Errors that abort an event-mutation run.
#[derive(Debug, thiserror::Error)]
pub enum MutateError {
    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),

    #[error("failed to encode remediation actions: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Run every rule template against the event, registering synthesized
/// checks and annotating the event with the collected remediation
/// actions.
///
/// When `api_key` is set it is used for every upsert and the auth
/// endpoint is never called; otherwise a fresh token is obtained per
/// firing rule (no caching across rules).
///
/// The remediation annotation key is always written, even when no rule
/// fired (value `[]`). Pre-existing check annotations are preserved
/// verbatim; only a stale copy of the remediation key itself is
/// overwritten.
pub async fn mutate(
    templates: &[CheckTemplate],
    evaluator: &RuleEvaluator,
    backend: &dyn BackendClient,
    api_key: Option<&str>,
    mut event: Event,
) -> Result<Event, MutateError> {
    let mut remediations: Vec<RemediationAction> = Vec::new();

    for rule in templates {
        let Some(outcome) = evaluator.evaluate(&event, rule) else {
            continue;
        };

        let credential = match api_key {
            Some(key) => Credential::ApiKey(key.to_string()),
            None => Credential::Bearer(backend.authenticate().await?),
        };

        backend.put_check(&credential, &outcome.check).await?;
        info!(
            rule = %rule.name,
            check = %outcome.check.metadata.name,
            publish = outcome.check.publish,
            "registered synthesized check"
        );

        if let Some(remediation) = outcome.remediation {
            remediations.push(remediation);
        }
    }

    debug!(count = remediations.len(), "annotating event with remediation actions");
    let encoded = serde_json::to_string(&remediations)?;
    event
        .check
        .metadata
        .annotations
        .insert(REMEDIATION_ANNOTATION_KEY.to_string(), encoded);

    Ok(event)
}
