//! The prompt data model: [`PromptState`], few-shot [`Example`]s, and the
//! partial [`StatePatch`] produced by the critique engine.
//!
//! `PromptState` is owned by the caller and passed by reference into every
//! core entry point. Nothing in this crate retains or mutates a caller's
//! state; the editing helpers below exist for callers that build or edit a
//! state in place (the CLI, tests, form layers).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete set of authoring fields describing a prompt under
/// construction.
///
/// Text fields default to the empty string. Serialized field names are
/// camelCase so share links from the web form decode unchanged.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptState {
    /// What the model should accomplish. Required for a usable prompt.
    pub goal: String,
    /// Persona assigned to the model.
    pub role: String,
    /// Intended reader or consumer of the output.
    pub audience: String,
    /// Background and definitions.
    pub context: String,
    /// Data or schema supplied to the task.
    pub inputs: String,
    /// Hard rules the answer must obey.
    pub constraints: String,
    /// Required shape of the answer.
    pub output_format: String,
    /// Tone and structure guidance.
    pub style: String,
    /// Suggested approach or procedure.
    pub steps: String,
    /// Few-shot pairs, rendered in order.
    pub examples: Vec<Example>,
    /// Safety and behavioral limits.
    pub guardrails: String,
    /// Criteria the final answer is judged against.
    pub rubric: String,
    /// User-defined `{{name}}` substitutions.
    pub variables: BTreeMap<String, String>,
}

/// One few-shot input/output pair.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Example {
    pub input: String,
    pub output: String,
}

/// Which side of an [`Example`] to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleSide {
    Input,
    Output,
}

impl Example {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// True when both input and output are empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.input.trim().is_empty() && self.output.trim().is_empty()
    }
}

/// Returns true if the text is empty after trimming.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

impl PromptState {
    /// The form's starting state: a generic expert role plus sensible
    /// constraints, format, style, steps, guardrails, and rubric. The goal is
    /// left empty for the author.
    ///
    /// [`Default`] is the all-empty state.
    pub fn starter() -> Self {
        Self {
            role: "You are a senior expert specialized in this task.".into(),
            constraints: "Be precise. Cite assumptions. Ask clarifying questions if needed.".into(),
            output_format: "Return a final answer AND a concise bullet summary.".into(),
            style: "Clear, direct, and structured. Prefer numbered steps and bullet points."
                .into(),
            steps: "1) Analyze 2) Plan 3) Execute 4) Validate 5) Summarize".into(),
            guardrails: crate::DEFAULT_GUARDRAILS.into(),
            rubric: crate::DEFAULT_RUBRIC.into(),
            ..Default::default()
        }
    }

    /// Examples that will actually be rendered (at least one non-blank side).
    pub fn rendered_examples(&self) -> impl Iterator<Item = &Example> {
        self.examples.iter().filter(|ex| !ex.is_blank())
    }

    // ── Variables ──────────────────────────────────────────────────

    /// Define or replace a variable. The name is trimmed; empty names are
    /// rejected and `false` is returned.
    pub fn set_variable(&mut self, name: &str, value: impl Into<String>) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.variables.insert(name.to_string(), value.into());
        true
    }

    /// Remove a variable. Returns the previous value, if any.
    pub fn remove_variable(&mut self, name: &str) -> Option<String> {
        self.variables.remove(name)
    }

    // ── Examples ───────────────────────────────────────────────────

    /// Append an empty example pair for the author to fill in.
    pub fn add_example(&mut self) {
        self.examples.push(Example::default());
    }

    /// Replace one side of the example at `index`. Out-of-range indices are
    /// ignored.
    pub fn update_example(&mut self, index: usize, side: ExampleSide, text: impl Into<String>) {
        if let Some(ex) = self.examples.get_mut(index) {
            match side {
                ExampleSide::Input => ex.input = text.into(),
                ExampleSide::Output => ex.output = text.into(),
            }
        }
    }

    /// Remove the example at `index`. Out-of-range indices are ignored.
    pub fn remove_example(&mut self, index: usize) {
        if index < self.examples.len() {
            self.examples.remove(index);
        }
    }

    // ── Combined limits editor ─────────────────────────────────────

    /// Constraints and guardrails as one block: constraints, then guardrails
    /// on the following line(s) when present.
    pub fn combined_limits(&self) -> String {
        if self.guardrails.is_empty() {
            self.constraints.clone()
        } else {
            format!("{}\n{}", self.constraints, self.guardrails)
        }
    }

    /// Split a combined block back into fields. The first line becomes
    /// `constraints`; every later line becomes `guardrails`.
    pub fn set_combined_limits(&mut self, text: &str) {
        match text.split_once('\n') {
            Some((first, rest)) => {
                self.constraints = first.to_string();
                self.guardrails = rest.to_string();
            }
            None => {
                self.constraints = text.to_string();
                self.guardrails.clear();
            }
        }
    }

    // ── Patches ────────────────────────────────────────────────────

    /// Overwrite every field that the patch sets.
    pub fn apply(&mut self, patch: &StatePatch) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if let Some(v) = &patch.$field { self.$field = v.clone(); })*
            };
        }
        take!(
            goal,
            role,
            audience,
            context,
            inputs,
            constraints,
            output_format,
            style,
            steps,
            examples,
            guardrails,
            rubric,
            variables
        );
    }
}

/// A partial [`PromptState`]: `Some` fields replace the corresponding state
/// field wholesale when applied.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Example>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardrails: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, String>>,
}

impl StatePatch {
    /// True when the patch sets no field.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn overlay(&mut self, other: StatePatch) {
        macro_rules! over {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        over!(
            goal,
            role,
            audience,
            context,
            inputs,
            constraints,
            output_format,
            style,
            steps,
            examples,
            guardrails,
            rubric,
            variables
        );
    }
}

/// `{...state, ...patch}`: a new state with the patch applied.
pub fn merge(state: &PromptState, patch: &StatePatch) -> PromptState {
    let mut merged = state.clone();
    merged.apply(patch);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_empty() {
        let state = PromptState::default();
        assert!(state.goal.is_empty());
        assert!(state.output_format.is_empty());
        assert!(state.examples.is_empty());
        assert!(state.variables.is_empty());
    }

    #[test]
    fn starter_leaves_goal_empty() {
        let state = PromptState::starter();
        assert!(state.goal.is_empty());
        assert!(!state.role.is_empty());
        assert!(!state.guardrails.is_empty());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let state: PromptState =
            serde_json::from_str(r#"{"goal":"g","outputFormat":"JSON"}"#).unwrap();
        assert_eq!(state.goal, "g");
        assert_eq!(state.output_format, "JSON");
        assert_eq!(state.role, "");
    }

    #[test]
    fn set_variable_trims_and_rejects_empty() {
        let mut state = PromptState::default();
        assert!(state.set_variable("  topic ", "cats"));
        assert!(!state.set_variable("   ", "ignored"));
        assert_eq!(state.variables.len(), 1);
        assert_eq!(state.variables["topic"], "cats");

        assert!(state.set_variable("topic", "dogs"));
        assert_eq!(state.variables["topic"], "dogs");
        assert_eq!(state.remove_variable("topic").as_deref(), Some("dogs"));
    }

    #[test]
    fn example_editing() {
        let mut state = PromptState::default();
        state.add_example();
        state.add_example();
        state.update_example(0, ExampleSide::Input, "a");
        state.update_example(1, ExampleSide::Output, "2");
        state.update_example(9, ExampleSide::Input, "ignored");
        assert_eq!(state.examples[0], Example::new("a", ""));
        assert_eq!(state.examples[1], Example::new("", "2"));

        state.remove_example(0);
        state.remove_example(5);
        assert_eq!(state.examples, vec![Example::new("", "2")]);
    }

    #[test]
    fn blank_examples_are_not_rendered() {
        let state = PromptState {
            examples: vec![Example::new(" ", "\n"), Example::new("a", "")],
            ..Default::default()
        };
        assert_eq!(state.rendered_examples().count(), 1);
    }

    #[test]
    fn combined_limits_split_on_first_line() {
        let mut state = PromptState::default();
        state.set_combined_limits("Be brief.\nNo fabrication.\nStay on topic.");
        assert_eq!(state.constraints, "Be brief.");
        assert_eq!(state.guardrails, "No fabrication.\nStay on topic.");
        assert_eq!(
            state.combined_limits(),
            "Be brief.\nNo fabrication.\nStay on topic."
        );

        state.set_combined_limits("Only one line");
        assert_eq!(state.constraints, "Only one line");
        assert!(state.guardrails.is_empty());
    }

    #[test]
    fn overlay_later_fields_win() {
        let mut patch = StatePatch {
            goal: Some("first".into()),
            rubric: Some("kept".into()),
            ..Default::default()
        };
        patch.overlay(StatePatch {
            goal: Some("second".into()),
            ..Default::default()
        });
        assert_eq!(patch.goal.as_deref(), Some("second"));
        assert_eq!(patch.rubric.as_deref(), Some("kept"));
    }

    #[test]
    fn merge_leaves_original_untouched() {
        let state = PromptState {
            goal: "old".into(),
            role: "kept".into(),
            ..Default::default()
        };
        let patch = StatePatch {
            goal: Some("new".into()),
            ..Default::default()
        };
        let merged = merge(&state, &patch);
        assert_eq!(merged.goal, "new");
        assert_eq!(merged.role, "kept");
        assert_eq!(state.goal, "old");
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = StatePatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }
}
