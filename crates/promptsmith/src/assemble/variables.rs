//! `{{name}}` placeholder substitution.
//!
//! Substitution is a keyed lookup in a single left-to-right pass, so the
//! result never depends on the iteration order of the variable map, and
//! substituted values are not scanned again.

use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Result of a substitution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    /// Text with every defined reference replaced.
    pub text: String,
    /// Names referenced with `{{name}}` but not defined. Left verbatim in
    /// `text`.
    pub unresolved: BTreeSet<String>,
}

/// A placeholder body counts as a reference only if it is non-empty and
/// contains no braces or line breaks.
fn is_reference(name: &str) -> bool {
    !name.is_empty() && !name.contains(['{', '}', '\n', '\r'])
}

/// Replace every `{{name}}` whose `name` exactly matches a key in `vars`.
///
/// Matching is case-sensitive with no whitespace tolerance: `{{ topic }}`
/// refers to a variable literally named ` topic `. References to undefined
/// names stay in the output and are reported in
/// [`Substitution::unresolved`].
pub fn substitute(text: &str, vars: &BTreeMap<String, String>) -> Substitution {
    let mut out = String::with_capacity(text.len());
    let mut unresolved = BTreeSet::new();
    let mut rest = text;

    while let Some((before, after_open)) = rest.split_once(OPEN) {
        out.push_str(before);
        match after_open.split_once(CLOSE) {
            Some((name, after_close)) if is_reference(name) => {
                match vars.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str(OPEN);
                        out.push_str(name);
                        out.push_str(CLOSE);
                        unresolved.insert(name.to_string());
                    }
                }
                rest = after_close;
            }
            Some(_) => {
                // Not a reference here; emit one brace and rescan from the
                // next one so `{{{name}}}` still finds `{{name}}`.
                out.push('{');
                rest = rest.split_at(before.len() + 1).1;
            }
            None => {
                out.push_str(OPEN);
                rest = after_open;
                break;
            }
        }
    }
    out.push_str(rest);

    if !unresolved.is_empty() {
        trace!(?unresolved, "unresolved variable references");
    }

    Substitution {
        text: out,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn replaces_defined_reference() {
        let s = substitute("Write about {{topic}}.", &vars(&[("topic", "cats")]));
        assert_eq!(s.text, "Write about cats.");
        assert!(s.unresolved.is_empty());
    }

    #[test]
    fn replaces_every_occurrence() {
        let s = substitute("{{a}} and {{a}}", &vars(&[("a", "x")]));
        assert_eq!(s.text, "x and x");
    }

    #[test]
    fn undefined_reference_left_verbatim() {
        let s = substitute("Write about {{missing}}", &BTreeMap::new());
        assert_eq!(s.text, "Write about {{missing}}");
        assert_eq!(s.unresolved, BTreeSet::from(["missing".to_string()]));
    }

    #[test]
    fn case_sensitive_and_no_whitespace_tolerance() {
        let s = substitute("{{Topic}} {{ topic }}", &vars(&[("topic", "cats")]));
        assert_eq!(s.text, "{{Topic}} {{ topic }}");
        assert!(s.unresolved.contains("Topic"));
        assert!(s.unresolved.contains(" topic "));
    }

    #[test]
    fn values_are_not_rescanned() {
        let s = substitute("{{a}}", &vars(&[("a", "{{b}}"), ("b", "nope")]));
        assert_eq!(s.text, "{{b}}");
        assert!(s.unresolved.is_empty());
    }

    #[test]
    fn triple_braces_find_inner_reference() {
        let s = substitute("{{{a}}}", &vars(&[("a", "x")]));
        assert_eq!(s.text, "{x}");
        assert!(s.unresolved.is_empty());
    }

    #[test]
    fn unterminated_and_empty_placeholders_are_literal() {
        let s = substitute("open {{ never closed and {{}}", &BTreeMap::new());
        assert_eq!(s.text, "open {{ never closed and {{}}");
        assert!(s.unresolved.is_empty());
    }

    #[test]
    fn multiline_body_is_not_a_reference() {
        let s = substitute("{{a\nb}}", &BTreeMap::new());
        assert_eq!(s.text, "{{a\nb}}");
        assert!(s.unresolved.is_empty());
    }

    #[test]
    fn multibyte_text_preserved() {
        let s = substitute("café {{x}} — ok", &vars(&[("x", "naïve")]));
        assert_eq!(s.text, "café naïve — ok");
    }
}
