//! Heuristic critique with an optional synthesized rewrite.
//!
//! A [`CritiqueEngine`] holds an ordered list of [`CritiqueRule`]s. Each rule
//! looks at the state (and the rendered prompt) and may produce a
//! [`Finding`]: a human-readable suggestion plus an optional [`StatePatch`]
//! fragment. The engine then:
//!
//! - collects suggestions in rule order,
//! - overlays patch fragments in rule order (later rules win per field),
//! - renders `assemble(merge(state, patch))` as the rewrite.
//!
//! When no rule fires the engine returns `None`. When rules fire but none
//! proposes a patch, the critique carries suggestions only.

pub mod rules;

use crate::assemble::{Rendered, assemble, render};
use crate::config::CritiqueConfig;
use crate::state::{PromptState, StatePatch, merge};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Suggestions for improving a prompt, optionally with a rewrite.
///
/// `rewrite` and `state_patch` are both `Some` or both `None`. When present,
/// `rewrite == assemble(&merge(state, state_patch))`.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Critique {
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_patch: Option<StatePatch>,
}

/// What a single rule found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Finding {
    pub suggestion: String,
    /// Fields this rule proposes to change. Empty for advice-only findings.
    pub patch: StatePatch,
}

impl Finding {
    /// A suggestion with no accompanying patch.
    pub fn advice(suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: suggestion.into(),
            patch: StatePatch::default(),
        }
    }

    /// A suggestion with a patch fragment.
    pub fn with_patch(suggestion: impl Into<String>, patch: StatePatch) -> Self {
        Self {
            suggestion: suggestion.into(),
            patch,
        }
    }
}

/// Inputs available to critique rules.
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub state: &'a PromptState,
    pub rendered: Rendered,
    pub config: &'a CritiqueConfig,
}

/// A named heuristic that may fire on a state.
pub struct CritiqueRule {
    pub name: String,
    pub evaluate: Box<dyn Fn(&RuleContext<'_>) -> Option<Finding> + Send + Sync>,
}

impl std::fmt::Debug for CritiqueRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CritiqueRule")
            .field("name", &self.name)
            .finish()
    }
}

/// Ordered set of critique rules plus the thresholds they read.
///
/// # Example
///
/// ```
/// use promptsmith::{CritiqueConfig, CritiqueEngine, PromptState};
///
/// let engine = CritiqueEngine::new(CritiqueConfig::default());
/// let critique = engine.critique(&PromptState::default()).unwrap();
/// assert!(!critique.suggestions.is_empty());
/// assert!(critique.rewrite.is_some());
/// ```
#[derive(Debug)]
pub struct CritiqueEngine {
    config: CritiqueConfig,
    rules: Vec<CritiqueRule>,
}

impl Default for CritiqueEngine {
    fn default() -> Self {
        Self::new(CritiqueConfig::default())
    }
}

impl CritiqueEngine {
    /// Engine with the standard rules, in their fixed evaluation order.
    pub fn new(config: CritiqueConfig) -> Self {
        let mut engine = Self {
            config,
            rules: Vec::new(),
        };
        rules::register_standard(&mut engine);
        engine
    }

    /// Engine with no rules; add them with [`register`](Self::register).
    pub fn empty(config: CritiqueConfig) -> Self {
        Self {
            config,
            rules: Vec::new(),
        }
    }

    /// Append a rule after all existing ones.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        evaluate: impl Fn(&RuleContext<'_>) -> Option<Finding> + Send + Sync + 'static,
    ) {
        self.rules.push(CritiqueRule {
            name: name.into(),
            evaluate: Box::new(evaluate),
        });
    }

    pub fn config(&self) -> &CritiqueConfig {
        &self.config
    }

    /// Names of the registered rules, in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Run every rule and synthesize the critique. `None` iff no rule fired.
    pub fn critique(&self, state: &PromptState) -> Option<Critique> {
        let ctx = RuleContext {
            state,
            rendered: render(state),
            config: &self.config,
        };

        let mut suggestions = Vec::new();
        let mut patch = StatePatch::default();
        for rule in &self.rules {
            if let Some(finding) = (rule.evaluate)(&ctx) {
                debug!(rule = %rule.name, "critique rule fired");
                suggestions.push(finding.suggestion);
                patch.overlay(finding.patch);
            }
        }

        if suggestions.is_empty() {
            return None;
        }

        let (rewrite, state_patch) = if patch.is_empty() {
            (None, None)
        } else {
            (Some(assemble(&merge(state, &patch))), Some(patch))
        };

        Some(Critique {
            suggestions,
            rewrite,
            state_patch,
        })
    }
}

static DEFAULT_ENGINE: LazyLock<CritiqueEngine> = LazyLock::new(CritiqueEngine::default);

/// Critique `state` with the default configuration.
pub fn critique(state: &PromptState) -> Option<Critique> {
    DEFAULT_ENGINE.critique(state)
}
