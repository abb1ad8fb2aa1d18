//! The per-rule evaluation state machine.
//!
//! For each `(event, rule)` pair: exclusion predicates, then the
//! inclusion predicate, then value extraction, command assembly, and
//! naming/identity resolution. Evaluation is pure (no I/O) and
//! produces at most one [`RuleOutcome`] per rule.

use indexmap::IndexMap;
use tracing::debug;

use checkforge_core::{
    labels, CheckDefinition, Event, RemediationAction, CHECK_TIMEOUT_SECS,
};

use crate::render::CommandRenderer;
use crate::template::CheckTemplate;

/// Scheduling interval applied when a template sets none (or zero).
pub const DEFAULT_INTERVAL_SECS: u32 = 10;

/// Everything a fired rule produced: the check definition to register
/// and, for non-published checks, the remediation descriptor to
/// annotate onto the event.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub check: CheckDefinition,
    pub remediation: Option<RemediationAction>,
}

/// Evaluates rule templates against events.
pub struct RuleEvaluator {
    renderer: CommandRenderer,
    /// Trailing suffix on every generated check name.
    default_suffix: String,
    /// Handler used when a template names none.
    default_handler: String,
}

impl RuleEvaluator {
    pub fn new(
        renderer: CommandRenderer,
        default_suffix: impl Into<String>,
        default_handler: impl Into<String>,
    ) -> Self {
        Self {
            renderer,
            default_suffix: default_suffix.into(),
            default_handler: default_handler.into(),
        }
    }

    /// Evaluate one rule against one event.
    ///
    /// Returns `None` when the rule does not apply: an exclusion
    /// predicate matched, the inclusion predicate did not, a named
    /// option failed to extract, or every requested positional argument
    /// failed to extract. These are all silent per-rule skips.
    pub fn evaluate(&self, event: &Event, rule: &CheckTemplate) -> Option<RuleOutcome> {
        for predicate in &rule.exclude_labels {
            if labels::matches(event, predicate) {
                debug!(rule = %rule.name, "exclusion predicate matched; skipping rule");
                return None;
            }
        }

        if !labels::matches(event, &rule.match_labels) {
            debug!(rule = %rule.name, "match predicate did not match; skipping rule");
            return None;
        }

        let mut command = rule.command.clone();

        // Named options extract all-or-nothing: a partial flag set would
        // produce a command the operator never declared.
        if !rule.options.is_empty() {
            let mut extracted = IndexMap::with_capacity(rule.options.len());
            for (flag, label) in &rule.options {
                match labels::resolve_non_empty(event, label) {
                    Some(value) => {
                        extracted.insert(flag.clone(), value.to_string());
                    }
                    None => {
                        debug!(rule = %rule.name, %label, "option label missing; skipping rule");
                        return None;
                    }
                }
            }
            command.push_str(&self.renderer.render_pairs(&extracted));
        }

        // Positional arguments are best-effort, but at least one must
        // resolve when any were requested.
        if !rule.arguments.is_empty() {
            let mut extracted = IndexMap::with_capacity(rule.arguments.len());
            for label in &rule.arguments {
                if let Some(value) = labels::resolve_non_empty(event, label) {
                    extracted.insert(label.clone(), value.to_string());
                }
            }
            if extracted.is_empty() {
                debug!(rule = %rule.name, "no argument labels resolved; skipping rule");
                return None;
            }
            command.push_str(&self.renderer.render_pairs(&extracted));
        }

        if !rule.bool_options.is_empty() {
            command.push_str(&self.renderer.render_flags(&rule.bool_options));
        }

        let name = self.check_name(event, rule);

        let subscription = if rule.subscription.is_empty() {
            event.entity_subscription()
        } else {
            rule.subscription.clone()
        };

        let proxy_entity_name = if rule.proxy_entity_id.is_empty() {
            String::new()
        } else {
            labels::resolve_non_empty(event, &rule.proxy_entity_id)
                .unwrap_or_default()
                .to_string()
        };

        let handlers = if rule.sensu_handlers.is_empty() {
            vec![self.default_handler.clone()]
        } else {
            rule.sensu_handlers.clone()
        };

        let interval = if rule.interval == 0 {
            DEFAULT_INTERVAL_SECS
        } else {
            rule.interval
        };

        let check = CheckDefinition {
            metadata: CheckDefinition::owned_metadata(name.clone(), event.namespace().to_string()),
            command,
            subscriptions: vec![subscription],
            interval,
            publish: rule.publish,
            timeout: CHECK_TIMEOUT_SECS,
            runtime_assets: rule.sensu_assets.clone(),
            handlers,
            proxy_entity_name,
        };

        // Published checks are scheduled by the backend itself; only
        // unpublished ones need a remediation trigger.
        let remediation = (!rule.publish).then(|| RemediationAction {
            request: name,
            occurrences: if rule.occurrences.is_empty() {
                vec![1]
            } else {
                rule.occurrences.clone()
            },
            severities: if rule.severities.is_empty() {
                vec![2]
            } else {
                rule.severities.clone()
            },
            subscriptions: vec![event.entity_subscription()],
        });

        Some(RuleOutcome { check, remediation })
    }

    /// `{event-check}-{rule}[-{resolved-suffix}]-{default-suffix}`.
    ///
    /// The suffix label is spliced in only when it resolves to a
    /// non-empty value; otherwise the default form is used.
    fn check_name(&self, event: &Event, rule: &CheckTemplate) -> String {
        if !rule.name_suffix.is_empty() {
            if let Some(suffix) = labels::resolve_non_empty(event, &rule.name_suffix) {
                return format!(
                    "{}-{}-{}-{}",
                    event.check_name(),
                    rule.name,
                    suffix,
                    self.default_suffix
                );
            }
        }
        format!(
            "{}-{}-{}",
            event.check_name(),
            rule.name,
            self.default_suffix
        )
    }
}
