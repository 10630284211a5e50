//! Pass/fail quality checklist over a [`PromptState`].
//!
//! A [`Checklist`] is an ordered registry of [`ChecklistRule`]s. Every rule
//! runs on every evaluation; a failing rule never short-circuits the others.
//! [`Checklist::standard`] registers the built-in battery, and callers may
//! [`register`](Checklist::register) more rules after it.

use crate::assemble::{Rendered, render};
use crate::state::{PromptState, is_blank};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Outcome of a single checklist rule.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Stable identifier for the rule.
    pub key: String,
    /// Human-readable description of what passing means.
    pub label: String,
    pub pass: bool,
}

/// Inputs available to checklist predicates.
///
/// Carries the assembler output alongside the state so that rules about
/// variables look at what substitution actually did.
#[derive(Debug)]
pub struct CheckContext<'a> {
    pub state: &'a PromptState,
    pub rendered: Rendered,
}

impl<'a> CheckContext<'a> {
    pub fn new(state: &'a PromptState) -> Self {
        Self {
            state,
            rendered: render(state),
        }
    }
}

/// A named presence or shape rule.
pub struct ChecklistRule {
    pub key: String,
    pub label: String,
    /// Returns true when the state passes the rule.
    pub check: Box<dyn Fn(&CheckContext<'_>) -> bool + Send + Sync>,
}

impl std::fmt::Debug for ChecklistRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChecklistRule")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish()
    }
}

/// Ordered registry of checklist rules.
///
/// # Example
///
/// ```
/// use promptsmith::checklist::Checklist;
/// use promptsmith::PromptState;
///
/// let mut list = Checklist::standard();
/// list.register("audience", "Audience is specified", |ctx| {
///     !ctx.state.audience.trim().is_empty()
/// });
///
/// let results = list.evaluate(&PromptState::default());
/// assert_eq!(results.len(), 7);
/// assert!(results.iter().all(|r| !r.pass || r.key == "variables"));
/// ```
#[derive(Debug, Default)]
pub struct Checklist {
    rules: Vec<ChecklistRule>,
}

impl Checklist {
    /// An empty checklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in battery, in its fixed order: goal, output format,
    /// constraints or guardrails, examples, variables, role.
    pub fn standard() -> Self {
        let mut list = Self::new();
        list.register("goal", "Goal is clearly stated", |ctx| {
            !is_blank(&ctx.state.goal)
        });
        list.register("output_format", "Output format is specified", |ctx| {
            !is_blank(&ctx.state.output_format)
        });
        list.register(
            "limits",
            "At least one constraint or guardrail is set",
            |ctx| !is_blank(&ctx.state.constraints) || !is_blank(&ctx.state.guardrails),
        );
        list.register("examples", "At least one example is provided", |ctx| {
            ctx.state.rendered_examples().next().is_some()
        });
        list.register(
            "variables",
            "All {{variables}} are defined",
            |ctx| ctx.rendered.is_fully_resolved(),
        );
        list.register("role", "Role is defined", |ctx| !is_blank(&ctx.state.role));
        list
    }

    /// Append a rule after all existing ones.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        check: impl Fn(&CheckContext<'_>) -> bool + Send + Sync + 'static,
    ) {
        self.rules.push(ChecklistRule {
            key: key.into(),
            label: label.into(),
            check: Box::new(check),
        });
    }

    /// Run every rule against `state`, in registration order.
    pub fn evaluate(&self, state: &PromptState) -> Vec<CheckResult> {
        let ctx = CheckContext::new(state);
        let results: Vec<CheckResult> = self
            .rules
            .iter()
            .map(|rule| CheckResult {
                key: rule.key.clone(),
                label: rule.label.clone(),
                pass: (rule.check)(&ctx),
            })
            .collect();

        debug!(
            total = results.len(),
            failed = results.iter().filter(|r| !r.pass).count(),
            "checklist evaluated"
        );
        results
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Check if a rule with the given key exists.
    pub fn has_rule(&self, key: &str) -> bool {
        self.rules.iter().any(|r| r.key == key)
    }
}

static STANDARD: LazyLock<Checklist> = LazyLock::new(Checklist::standard);

/// Evaluate the standard checklist. Order is fixed across calls.
pub fn checklist(state: &PromptState) -> Vec<CheckResult> {
    STANDARD.evaluate(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Example;

    fn pass_of(results: &[CheckResult], key: &str) -> bool {
        results.iter().find(|r| r.key == key).unwrap().pass
    }

    #[test]
    fn standard_order_is_fixed() {
        let keys: Vec<String> = checklist(&PromptState::default())
            .into_iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(
            keys,
            ["goal", "output_format", "limits", "examples", "variables", "role"]
        );
    }

    #[test]
    fn empty_state_fails_everything_but_variables() {
        let results = checklist(&PromptState::default());
        assert_eq!(results.len(), 6);
        for r in &results {
            assert_eq!(r.pass, r.key == "variables", "{}", r.key);
        }
    }

    #[test]
    fn whitespace_only_goal_fails() {
        let state = PromptState {
            goal: "  \n ".into(),
            ..Default::default()
        };
        assert!(!pass_of(&checklist(&state), "goal"));
    }

    #[test]
    fn guardrails_alone_satisfy_limits() {
        let state = PromptState {
            guardrails: "No fabrication.".into(),
            ..Default::default()
        };
        assert!(pass_of(&checklist(&state), "limits"));
    }

    #[test]
    fn blank_examples_do_not_count() {
        let mut state = PromptState::default();
        state.add_example();
        assert!(!pass_of(&checklist(&state), "examples"));

        state.examples = vec![Example::new("in", "out")];
        assert!(pass_of(&checklist(&state), "examples"));
    }

    #[test]
    fn unresolved_variable_fails() {
        let mut state = PromptState {
            goal: "Write about {{missing}}".into(),
            ..Default::default()
        };
        assert!(!pass_of(&checklist(&state), "variables"));

        state.set_variable("missing", "cats");
        assert!(pass_of(&checklist(&state), "variables"));
    }

    #[test]
    fn reference_outside_goal_is_checked() {
        let state = PromptState {
            role: "Expert in {{domain}}".into(),
            ..Default::default()
        };
        assert!(!pass_of(&checklist(&state), "variables"));
    }

    #[test]
    fn custom_rules_append_after_standard() {
        let mut list = Checklist::standard();
        list.register("rubric", "Rubric is defined", |ctx| {
            !is_blank(&ctx.state.rubric)
        });
        assert_eq!(list.rule_count(), 7);
        assert!(list.has_rule("rubric"));
        let results = list.evaluate(&PromptState::default());
        assert_eq!(results.last().unwrap().key, "rubric");
    }
}
