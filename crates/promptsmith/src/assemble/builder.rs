//! Section-based text builder.
//!
//! [`SectionBuilder`] joins headed blocks into a single prompt. Blank content
//! never produces a heading, so the output has no empty sections.

const HEADING_PREFIX: &str = "##";

/// Builder for multi-section prompt text.
///
/// Each section is a heading line immediately followed by its content.
/// Sections are separated by exactly one blank line. Content that is empty or
/// whitespace-only is skipped together with its heading.
///
/// # Example
///
/// ```
/// use promptsmith::assemble::SectionBuilder;
///
/// let text = SectionBuilder::new()
///     .section("Goal", "Summarize the report.")
///     .section("Context", "   ")
///     .section("Style", "Plain language.")
///     .build();
///
/// assert_eq!(text, "## Goal\nSummarize the report.\n\n## Style\nPlain language.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    sections: Vec<String>,
}

impl SectionBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a headed section. Skipped if `content` is blank.
    ///
    /// Content is trimmed so that sections never contribute stray blank
    /// lines at their edges.
    pub fn section(mut self, heading: &str, content: impl Into<String>) -> Self {
        let content: String = content.into();
        let content = content.trim();
        if !content.is_empty() {
            self.sections
                .push(format!("{HEADING_PREFIX} {heading}\n{content}"));
        }
        self
    }

    /// Number of sections rendered so far.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Join all sections with one blank line between them.
    pub fn build(self) -> String {
        self.sections.join("\n\n").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_is_empty_text() {
        assert_eq!(SectionBuilder::new().build(), "");
    }

    #[test]
    fn heading_line_then_content() {
        let text = SectionBuilder::new().section("Goal", "Do it").build();
        assert_eq!(text, "## Goal\nDo it");
    }

    #[test]
    fn sections_separated_by_one_blank_line() {
        let text = SectionBuilder::new()
            .section("A", "one\n\n")
            .section("B", "\ntwo")
            .build();
        assert_eq!(text, "## A\none\n\n## B\ntwo");
    }

    #[test]
    fn whitespace_only_section_skipped() {
        let builder = SectionBuilder::new()
            .section("Blank", " \n\t ")
            .section("Present", "content");
        assert_eq!(builder.len(), 1);
        let text = builder.build();
        assert!(!text.contains("Blank"));
        assert!(text.contains("## Present"));
    }
}
