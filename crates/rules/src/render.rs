//! Command-fragment rendering.
//!
//! The two configurable minijinja templates are wrapped behind exactly
//! two typed operations: an ordered key/value render (named options and
//! positional arguments) and a list render (boolean flags). Rendering
//! failure degrades to an empty fragment instead of aborting the rule;
//! a broken template drops that argument class and nothing else.
//!
//! Templates are arbitrary config strings, so a fresh
//! [`minijinja::Environment`] is created per render call.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

/// Default template for flag/value pairs. Each fragment carries its own
/// leading space so fragments concatenate directly onto the command.
pub const DEFAULT_ARGUMENTS_TEMPLATE: &str =
    "{% for key, value in pairs|items %} {{ key }} {{ value }}{% endfor %}";

/// Default template for literal boolean flags.
pub const DEFAULT_BOOL_ARGUMENTS_TEMPLATE: &str =
    "{% for flag in flags %} {{ flag }}{% endfor %}";

#[derive(Serialize)]
struct PairsContext<'a> {
    pairs: &'a IndexMap<String, String>,
}

#[derive(Serialize)]
struct FlagsContext<'a> {
    flags: &'a [String],
}

/// Renders extracted values into command-argument fragments.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    pairs_template: String,
    flags_template: String,
}

impl CommandRenderer {
    pub fn new(pairs_template: impl Into<String>, flags_template: impl Into<String>) -> Self {
        Self {
            pairs_template: pairs_template.into(),
            flags_template: flags_template.into(),
        }
    }

    /// Render an ordered flag-token → value mapping. The template sees
    /// the mapping as `pairs`, in insertion order.
    pub fn render_pairs(&self, pairs: &IndexMap<String, String>) -> String {
        render_or_empty(&self.pairs_template, &PairsContext { pairs })
    }

    /// Render a list of literal flag tokens. The template sees the list
    /// as `flags`.
    pub fn render_flags(&self, flags: &[String]) -> String {
        render_or_empty(&self.flags_template, &FlagsContext { flags })
    }
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ARGUMENTS_TEMPLATE, DEFAULT_BOOL_ARGUMENTS_TEMPLATE)
    }
}

fn render_or_empty<C: Serialize>(template: &str, ctx: &C) -> String {
    let env = minijinja::Environment::new();
    match env.render_str(template, ctx) {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!(error = %e, "command template failed to render; dropping fragment");
            String::new()
        }
    }
}
