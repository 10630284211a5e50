//! Structured prompt assembly with a quality checklist and heuristic critique.
//!
//! `promptsmith` turns discrete authoring fields (goal, role, context,
//! constraints, few-shot examples, variables, ...) held in a [`PromptState`]
//! into a single deterministic prompt, and grades that prompt against a fixed
//! rubric. It has three entry points, all pure functions of the state:
//!
//! ```
//! use promptsmith::{PromptState, Example, assemble, checklist, critique};
//!
//! let mut state = PromptState {
//!     goal: "Write a short explainer about {{topic}}.".into(),
//!     output_format: "Three bullet points.".into(),
//!     ..Default::default()
//! };
//! state.set_variable("topic", "tides");
//!
//! let prompt = assemble(&state);
//! assert!(prompt.contains("Write a short explainer about tides."));
//!
//! let results = checklist(&state);
//! assert!(results.iter().any(|r| r.key == "examples" && !r.pass));
//!
//! let critique = critique(&state).expect("examples, limits and rubric are missing");
//! assert_eq!(critique.rewrite, Some(assemble(&promptsmith::merge(
//!     &state,
//!     critique.state_patch.as_ref().unwrap(),
//! ))));
//! ```
//!
//! # Where to find things
//!
//! - **Render a prompt:** [`assemble()`] for the text, or
//!   [`assemble::render`] to also get unresolved `{{variables}}`. The section
//!   order lives in [`assemble::Section`]; [`assemble::SectionBuilder`] does
//!   the joining.
//! - **Grade a prompt:** [`checklist()`] runs the standard battery.
//!   Build a [`checklist::Checklist`] to add custom rules.
//! - **Get suggestions and a rewrite:** [`critique()`], or a
//!   [`CritiqueEngine`] with a custom [`CritiqueConfig`].
//! - **Apply improvements:** [`merge`] or [`PromptState::apply`] with the
//!   critique's [`StatePatch`].
//! - **Share a state in a link:** [`share::encode`] / [`share::decode`].
//! - **Reuse states:** [`PresetLibrary`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`state`] | [`PromptState`], [`Example`], [`StatePatch`], editing helpers |
//! | [`assemble`] | Section ordering, section builder, `{{variable}}` substitution |
//! | [`checklist`] | Pass/fail [`CheckResult`]s from an ordered rule registry |
//! | [`critique`] | Heuristic rules, suggestions, state patch and rewrite |
//! | [`share`] | URL-fragment encoding of a state |
//! | [`preset`] | Named state snapshots and their JSON persistence |
//! | [`config`] | [`CritiqueConfig`] thresholds |
//!
//! Every core function is synchronous, allocation-only, and never mutates
//! its input, so calls from many threads need no locking.

pub mod assemble;
pub mod checklist;
pub mod config;
pub mod critique;
pub mod error;
pub mod prelude;
pub mod preset;
pub mod share;
pub mod state;

use schemars::JsonSchema;

pub use assemble::{Rendered, assemble, render};
pub use checklist::{CheckResult, checklist};
pub use config::CritiqueConfig;
pub use critique::{Critique, CritiqueEngine, critique};
pub use error::{Error, Result};
pub use preset::{Preset, PresetLibrary};
pub use state::{Example, ExampleSide, PromptState, StatePatch, merge};

// Re-export schemars for downstream crates.
pub use schemars;

// ── Constants ──────────────────────────────────────────────────────

/// Guardrails used by the starter state and proposed by the critique engine.
pub const DEFAULT_GUARDRAILS: &str =
    "Do not fabricate facts. State uncertainties. Refuse out-of-scope or harmful requests.";

/// Rubric used by the starter state and proposed by the critique engine.
pub const DEFAULT_RUBRIC: &str =
    "The answer is useful, correct, complete, concise, and reproducible.";

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema `serde_json::Value` for a type, e.g. so a form
/// layer can validate a [`PromptState`] before handing it over.
///
/// ```
/// use promptsmith::{PromptState, json_schema_for};
///
/// let schema = json_schema_for::<PromptState>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["properties"]["outputFormat"].is_object());
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}
