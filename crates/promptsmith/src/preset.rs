//! Named, reusable [`PromptState`] snapshots.
//!
//! A [`PresetLibrary`] is an ordered list of [`Preset`]s owned by the caller.
//! The core entry points never read it; selecting a preset just means passing
//! its `state` to them. The library ships a few built-in presets and can be
//! persisted as JSON by the caller.

use crate::error::{Error, Result};
use crate::state::{Example, PromptState};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A named snapshot of a prompt state.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Externally assigned identifier.
    pub id: String,
    pub name: String,
    pub state: PromptState,
}

/// Ordered collection of presets. Newest custom presets come first.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetLibrary {
    pub presets: Vec<Preset>,
}

impl PresetLibrary {
    /// The presets shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            presets: vec![summarizer(), code_reviewer(), data_extractor()],
        }
    }

    /// Load a library from a JSON file, or fall back to the built-in presets
    /// if the file does not exist.
    pub fn load_or_builtin(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = std::fs::read_to_string(path)?;
            let library: PresetLibrary = serde_json::from_str(&data).map_err(Error::from_decode)?;
            debug!(
                "Loaded preset library from {} ({} presets)",
                path.display(),
                library.len()
            );
            Ok(library)
        } else {
            debug!("No preset library at {}, using built-ins", path.display());
            Ok(Self::builtin())
        }
    }

    /// Save the library as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        debug!(
            "Saved preset library to {} ({} presets)",
            path.display(),
            self.len()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Like [`find`](Self::find), but an unknown id is an error.
    pub fn get(&self, id: &str) -> Result<&Preset> {
        self.find(id)
            .ok_or_else(|| Error::UnknownPreset(id.to_string()))
    }

    /// Snapshot `state` as a new preset named `Custom N` (N is the library
    /// size after insertion) and put it at the front.
    pub fn save_as(&mut self, state: PromptState) -> &Preset {
        let preset = Preset {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("Custom {}", self.presets.len() + 1),
            state,
        };
        debug!(id = %preset.id, name = %preset.name, "saved preset");
        self.presets.insert(0, preset);
        &self.presets[0]
    }

    /// Remove a preset by id. Returns the removed preset, if any.
    pub fn remove(&mut self, id: &str) -> Option<Preset> {
        let index = self.presets.iter().position(|p| p.id == id)?;
        Some(self.presets.remove(index))
    }
}

fn summarizer() -> Preset {
    Preset {
        id: "summarizer".into(),
        name: "Document summarizer".into(),
        state: PromptState {
            goal: "Summarize {{document}} for {{reader}}, keeping every decision and open question.".into(),
            role: "You are an editor who writes precise executive summaries.".into(),
            audience: "Busy stakeholders who will not read the source.".into(),
            output_format: "A one-sentence headline, then at most five bullet points.".into(),
            style: "Plain language, no jargon, active voice.".into(),
            constraints: "Use only facts stated in the document.".into(),
            guardrails: crate::DEFAULT_GUARDRAILS.into(),
            rubric: "A reader can act on the summary without opening the document.".into(),
            examples: vec![Example::new(
                "Meeting notes: ship date moved to May; budget approved; hiring still open.",
                "Ship date slips to May.\n- Budget approved\n- Open question: hiring plan",
            )],
            variables: [
                ("document".to_string(), "the attached document".to_string()),
                ("reader".to_string(), "the leadership team".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        },
    }
}

fn code_reviewer() -> Preset {
    Preset {
        id: "code-review".into(),
        name: "Code reviewer".into(),
        state: PromptState {
            goal: "Review the following {{language}} change for correctness and maintainability.".into(),
            role: "You are a senior engineer doing a careful code review.".into(),
            inputs: "A unified diff of the change.".into(),
            steps: "1) Read the diff 2) Identify bugs 3) Note style issues 4) Summarize".into(),
            output_format: "A list of findings, each with file, line, severity, and a suggested fix.".into(),
            constraints: "Only comment on lines that the diff touches.".into(),
            guardrails: "Do not invent APIs. Say so when unsure.".into(),
            rubric: "Every finding is actionable and points at a specific line.".into(),
            variables: [("language".to_string(), "Rust".to_string())]
                .into_iter()
                .collect(),
            ..Default::default()
        },
    }
}

fn data_extractor() -> Preset {
    Preset {
        id: "extract-json".into(),
        name: "Structured data extraction".into(),
        state: PromptState {
            goal: "Extract every company name and founding year from the input text.".into(),
            role: "You are a meticulous data-entry specialist.".into(),
            output_format: "JSON array of objects with keys \"name\" (string) and \"year\" (number or null).".into(),
            constraints: "Return only the JSON, no commentary.".into(),
            guardrails: "Use null when a year is not stated. Never guess.".into(),
            rubric: "Valid JSON; no missing or invented entries.".into(),
            examples: vec![Example::new(
                "Acme was founded in 1999. Globex followed later.",
                r#"[{"name":"Acme","year":1999},{"name":"Globex","year":null}]"#,
            )],
            ..Default::default()
        },
    }
}
