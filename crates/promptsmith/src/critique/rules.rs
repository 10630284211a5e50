//! The standard critique heuristics.
//!
//! Registered in a fixed order: goal, output format, examples, limits,
//! variables, rubric. Suggestion order and patch precedence both follow it.

use super::{CritiqueEngine, Finding, RuleContext};
use crate::assemble::substitute;
use crate::state::{Example, StatePatch, is_blank};
use crate::{DEFAULT_GUARDRAILS, DEFAULT_RUBRIC};

/// Prepended to a short goal, or used alone for an empty one.
pub const GOAL_PLACEHOLDER: &str = "[Clarify the task and the desired outcome]";

/// Replacement for an empty or generic output format.
pub const STRUCTURED_OUTPUT_FORMAT: &str =
    "Return a bulleted list of key points, followed by a one-paragraph summary.";

pub const EXAMPLE_INPUT_PLACEHOLDER: &str = "[A representative input]";
pub const EXAMPLE_OUTPUT_PLACEHOLDER: &str = "[The ideal output for that input]";

pub(super) fn register_standard(engine: &mut CritiqueEngine) {
    engine.register("goal", goal);
    engine.register("output_format", output_format);
    engine.register("examples", examples);
    engine.register("limits", limits);
    engine.register("variables", variables);
    engine.register("rubric", rubric);
}

fn goal(ctx: &RuleContext<'_>) -> Option<Finding> {
    let goal = ctx.state.goal.trim();
    if goal.is_empty() {
        return Some(Finding::with_patch(
            "Add a goal that states what the model should accomplish and what a good result looks like.",
            StatePatch {
                goal: Some(GOAL_PLACEHOLDER.to_string()),
                ..Default::default()
            },
        ));
    }
    // Length counts what the model will read, so templated goals are
    // measured with their variables filled in.
    let expanded = substitute(goal, &ctx.state.variables).text;
    if expanded.trim().chars().count() >= ctx.config.min_goal_chars {
        return None;
    }
    Some(Finding::with_patch(
        format!("Clarify the goal: \"{goal}\" is too short to tell the model what success looks like."),
        StatePatch {
            goal: Some(format!("{GOAL_PLACEHOLDER} {goal}")),
            ..Default::default()
        },
    ))
}

fn output_format(ctx: &RuleContext<'_>) -> Option<Finding> {
    let format = ctx.state.output_format.trim();
    let suggestion = if format.is_empty() {
        "Specify the output format, e.g. bullet points, a table, or a JSON schema.".to_string()
    } else if ctx.config.is_generic_output_format(format) {
        format!(
            "\"{format}\" is a vague output format; specify the structure, e.g. bullet points, a table, or a JSON schema."
        )
    } else {
        return None;
    };
    Some(Finding::with_patch(
        suggestion,
        StatePatch {
            output_format: Some(STRUCTURED_OUTPUT_FORMAT.to_string()),
            ..Default::default()
        },
    ))
}

fn examples(ctx: &RuleContext<'_>) -> Option<Finding> {
    if ctx.state.rendered_examples().next().is_some() {
        return None;
    }
    let mut examples = ctx.state.examples.clone();
    examples.push(Example::new(
        EXAMPLE_INPUT_PLACEHOLDER,
        EXAMPLE_OUTPUT_PLACEHOLDER,
    ));
    Some(Finding::with_patch(
        "Add at least one few-shot example pairing an input with the ideal output.",
        StatePatch {
            examples: Some(examples),
            ..Default::default()
        },
    ))
}

fn limits(ctx: &RuleContext<'_>) -> Option<Finding> {
    if !is_blank(&ctx.state.constraints) || !is_blank(&ctx.state.guardrails) {
        return None;
    }
    Some(Finding::with_patch(
        "Add explicit guardrails against fabricated facts and out-of-scope requests.",
        StatePatch {
            guardrails: Some(DEFAULT_GUARDRAILS.to_string()),
            ..Default::default()
        },
    ))
}

// Advice only: choosing a value for a variable is the author's call.
fn variables(ctx: &RuleContext<'_>) -> Option<Finding> {
    if ctx.rendered.is_fully_resolved() {
        return None;
    }
    let names = ctx
        .rendered
        .unresolved
        .iter()
        .map(|name| format!("{{{{{name}}}}}"))
        .collect::<Vec<_>>()
        .join(", ");
    let noun = if ctx.rendered.unresolved.len() == 1 {
        "variable"
    } else {
        "variables"
    };
    Some(Finding::advice(format!(
        "Define the missing {noun}: {names}."
    )))
}

fn rubric(ctx: &RuleContext<'_>) -> Option<Finding> {
    if !is_blank(&ctx.state.rubric) {
        return None;
    }
    Some(Finding::with_patch(
        "Define success criteria (a rubric) the answer will be judged against.",
        StatePatch {
            rubric: Some(DEFAULT_RUBRIC.to_string()),
            ..Default::default()
        },
    ))
}
