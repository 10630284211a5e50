//! Convenience re-exports for common `promptsmith` types.
//!
//! ```
//! use promptsmith::prelude::*;
//!
//! let state = PromptState::starter();
//! assert!(critique(&state).is_some());
//! ```
//!
//! Builder internals (section table, substitution, rule contexts) are not
//! included; import those from their modules directly.

pub use crate::{
    CheckResult, Critique, CritiqueConfig, CritiqueEngine, Error, Example, ExampleSide, Preset,
    PresetLibrary, PromptState, Rendered, Result, StatePatch, assemble, checklist, critique,
    merge, render,
};
