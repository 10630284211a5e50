//! Prompt assembly: ordered sections, then variable substitution.
//!
//! The assembler has three layers:
//!
//! 1. **[`SectionBuilder`]** joins `## Heading` blocks, dropping blank ones.
//! 2. **[`Section`]** fixes which sections exist, their order, and which
//!    [`PromptState`] field backs each.
//! 3. **[`substitute`]** replaces `{{name}}` placeholders in each section
//!    body and reports the names it could not resolve.
//!
//! Bodies are substituted before the builder decides which sections to
//! keep, so a placeholder that expands to nothing drops its heading too.
//! [`render`] runs all three and keeps the unresolved names;
//! [`assemble`] returns just the text. The checklist and critique engine
//! consume [`render`] so there is exactly one substitution implementation.

pub mod builder;
pub mod sections;
pub mod variables;

pub use builder::SectionBuilder;
pub use sections::Section;
pub use variables::{Substitution, substitute};

use crate::state::PromptState;
use std::collections::BTreeSet;
use tracing::debug;

/// Assembled prompt text plus the references substitution left in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub unresolved: BTreeSet<String>,
}

impl Rendered {
    /// True when every `{{name}}` reference was substituted.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Render `state` into prompt text, keeping track of unresolved variables.
///
/// Identical input always yields byte-identical output. Blank fields are
/// omitted with their headings; the result is trimmed.
pub fn render(state: &PromptState) -> Rendered {
    let mut unresolved = BTreeSet::new();
    let body = Section::ALL
        .into_iter()
        .fold(SectionBuilder::new(), |builder, section| {
            let substituted = substitute(&section.body(state), &state.variables);
            unresolved.extend(substituted.unresolved);
            builder.section(section.heading(), substituted.text)
        });
    let sections = body.len();
    let text = body.build();

    debug!(
        sections,
        chars = text.len(),
        unresolved = unresolved.len(),
        "assembled prompt"
    );

    Rendered {
        text: text.trim().to_string(),
        unresolved,
    }
}

/// Render `state` into a single prompt text block.
///
/// Total over every `PromptState`, including the empty one (which yields
/// the empty string).
pub fn assemble(state: &PromptState) -> String {
    render(state).text
}
