//! The fixed, ordered set of prompt sections and the field(s) backing each.

use crate::state::PromptState;

/// A named block of the assembled prompt. Variants are declared in render
/// order; [`Section::ALL`] is the authoritative sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Role,
    Goal,
    Audience,
    Context,
    Inputs,
    Examples,
    Steps,
    Style,
    OutputFormat,
    Constraints,
    Guardrails,
    Rubric,
}

impl Section {
    /// Every section, in render order.
    pub const ALL: [Section; 12] = [
        Section::Role,
        Section::Goal,
        Section::Audience,
        Section::Context,
        Section::Inputs,
        Section::Examples,
        Section::Steps,
        Section::Style,
        Section::OutputFormat,
        Section::Constraints,
        Section::Guardrails,
        Section::Rubric,
    ];

    /// Heading text shown above the section body.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Role => "Role",
            Self::Goal => "Goal",
            Self::Audience => "Audience",
            Self::Context => "Context",
            Self::Inputs => "Inputs",
            Self::Examples => "Examples",
            Self::Steps => "Steps",
            Self::Style => "Style",
            Self::OutputFormat => "Output Format",
            Self::Constraints => "Constraints",
            Self::Guardrails => "Guardrails",
            Self::Rubric => "Rubric",
        }
    }

    /// Unsubstituted section body. Blank bodies are dropped by the builder.
    pub fn body(self, state: &PromptState) -> String {
        let text = match self {
            Self::Role => &state.role,
            Self::Goal => &state.goal,
            Self::Audience => &state.audience,
            Self::Context => &state.context,
            Self::Inputs => &state.inputs,
            Self::Examples => return render_examples(state),
            Self::Steps => &state.steps,
            Self::Style => &state.style,
            Self::OutputFormat => &state.output_format,
            Self::Constraints => &state.constraints,
            Self::Guardrails => &state.guardrails,
            Self::Rubric => &state.rubric,
        };
        text.clone()
    }
}

/// One line per non-blank example, numbered from 1 in sequence order.
fn render_examples(state: &PromptState) -> String {
    state
        .rendered_examples()
        .enumerate()
        .map(|(i, ex)| {
            let line = format!(
                "Example {} — Input: {} / Output: {}",
                i + 1,
                ex.input.trim(),
                ex.output.trim()
            );
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
