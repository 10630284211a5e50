//! Assemble, check, and critique structured prompts from the command line.
//!
//! The prompt state comes from a JSON file, a share link, a preset, the
//! starter template, or stdin (JSON), in that order of precedence.
//!
//! # Examples
//!
//! ```sh
//! # Render a prompt from a JSON state file
//! promptsmith --state prompt.json assemble
//!
//! # Quality checklist as JSON
//! promptsmith --state prompt.json --json check
//!
//! # Critique, then print the improved state
//! promptsmith --state prompt.json critique --apply > improved.json
//!
//! # Open a share link and turn it back into JSON
//! promptsmith --link 'https://example.test/builder#eyJnb2FsIjoi...' decode
//!
//! # Work from a preset and produce a link
//! promptsmith --preset summarizer link --base https://example.test/builder
//!
//! # Verbose logging
//! PROMPTSMITH_LOG=debug promptsmith --starter critique
//! ```

use clap::{Parser, Subcommand};
use promptsmith::{
    CheckResult, Critique, Preset, PresetLibrary, PromptState, assemble, checklist, critique,
    json_schema_for, merge, share,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default preset library location when `--library` is not given.
const DEFAULT_LIBRARY: &str = "promptsmith-presets.json";

/// Assemble, check, and critique structured prompts.
#[derive(Parser)]
#[command(name = "promptsmith")]
struct Cli {
    // ── State source ───────────────────────────────────────────
    /// Read the prompt state from a JSON file
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Read the prompt state from a share link (full URL or bare fragment)
    #[arg(long, global = true)]
    link: Option<String>,

    /// Use a preset from the library as the prompt state
    #[arg(long, global = true)]
    preset: Option<String>,

    /// Start from the built-in starter state
    #[arg(long, global = true)]
    starter: bool,

    /// Preset library file (built-in presets if it does not exist)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    // ── Output mode ────────────────────────────────────────────
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the assembled prompt
    Assemble,
    /// Print the quality checklist
    Check,
    /// Print critique suggestions and the suggested rewrite
    Critique {
        /// Print the state with all suggested improvements applied
        #[arg(long)]
        apply: bool,
    },
    /// Print the compact share encoding of the state
    Encode,
    /// Print the state as JSON (useful with --link)
    Decode,
    /// Print a share URL for the state
    Link {
        /// Base URL the fragment is attached to
        #[arg(long)]
        base: String,
    },
    /// Print the JSON Schema of the prompt state (or of a preset library)
    Schema {
        /// Schema for the preset library file instead
        #[arg(long)]
        presets: bool,
    },
    /// Manage the preset library
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// List preset ids and names
    List,
    /// Print one preset's state as JSON
    Show { id: String },
    /// Save the current state as a new custom preset
    Save,
}

// ── Helpers ────────────────────────────────────────────────────────

fn library_path(cli: &Cli) -> &Path {
    cli.library
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_LIBRARY))
}

fn load_library(cli: &Cli) -> Result<PresetLibrary, String> {
    PresetLibrary::load_or_builtin(library_path(cli))
        .map_err(|e| format!("failed to load preset library: {e}"))
}

fn read_stdin_content() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(buf)
}

fn parse_state_json(json: &str, origin: &str) -> Result<PromptState, String> {
    serde_json::from_str(json).map_err(|e| format!("failed to parse state from {origin}: {e}"))
}

/// Resolve the prompt state from the CLI flags.
fn load_state(cli: &Cli) -> Result<PromptState, String> {
    if let Some(path) = &cli.state {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read state file '{}': {e}", path.display()))?;
        return parse_state_json(&content, &path.display().to_string());
    }
    if let Some(link) = &cli.link {
        let decoded = if link.contains('#') {
            share::state_from_url(link)
        } else {
            share::decode(link)
        };
        return decoded.map_err(|e| format!("failed to decode link: {e}"));
    }
    if let Some(id) = &cli.preset {
        let library = load_library(cli)?;
        return library
            .get(id)
            .map(|p| p.state.clone())
            .map_err(|e| e.to_string());
    }
    if cli.starter {
        return Ok(PromptState::starter());
    }
    parse_state_json(&read_stdin_content()?, "stdin")
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to serialize output: {e}"))
}

fn format_checklist(results: &[CheckResult]) -> String {
    results
        .iter()
        .map(|r| {
            let mark = if r.pass { "x" } else { " " };
            format!("[{mark}] {}", r.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_critique(critique: Option<&Critique>) -> String {
    let Some(critique) = critique else {
        return "No suggestions.".to_string();
    };
    let mut out = critique
        .suggestions
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    if let Some(rewrite) = &critique.rewrite {
        out.push_str("\n\n--- Suggested rewrite ---\n");
        out.push_str(rewrite);
    }
    out
}

fn format_presets(presets: &[Preset]) -> String {
    presets
        .iter()
        .map(|p| format!("{}\t{}", p.id, p.name))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Commands ───────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<String, String> {
    match &cli.command {
        Command::Assemble => {
            let prompt = assemble(&load_state(cli)?);
            if cli.json {
                to_json(&serde_json::json!({ "prompt": prompt }))
            } else {
                Ok(prompt)
            }
        }
        Command::Check => {
            let results = checklist(&load_state(cli)?);
            if cli.json {
                to_json(&results)
            } else {
                Ok(format_checklist(&results))
            }
        }
        Command::Critique { apply } => {
            let state = load_state(cli)?;
            let critique = critique(&state);
            if *apply {
                let improved = match critique.as_ref().and_then(|c| c.state_patch.as_ref()) {
                    Some(patch) => merge(&state, patch),
                    None => state,
                };
                return to_json(&improved);
            }
            if cli.json {
                to_json(&critique)
            } else {
                Ok(format_critique(critique.as_ref()))
            }
        }
        Command::Encode => share::encode(&load_state(cli)?).map_err(|e| e.to_string()),
        Command::Decode => to_json(&load_state(cli)?),
        Command::Link { base } => {
            share::share_url(base, &load_state(cli)?).map_err(|e| e.to_string())
        }
        Command::Schema { presets } => {
            let schema = if *presets {
                json_schema_for::<PresetLibrary>()
            } else {
                json_schema_for::<PromptState>()
            };
            to_json(&schema)
        }
        Command::Presets { action } => run_presets(cli, action),
    }
}

fn run_presets(cli: &Cli, action: &PresetAction) -> Result<String, String> {
    match action {
        PresetAction::List => {
            let library = load_library(cli)?;
            if cli.json {
                to_json(&library.presets)
            } else {
                Ok(format_presets(&library.presets))
            }
        }
        PresetAction::Show { id } => {
            let library = load_library(cli)?;
            let preset = library.get(id).map_err(|e| e.to_string())?;
            to_json(&preset.state)
        }
        PresetAction::Save => {
            let state = load_state(cli)?;
            let mut library = load_library(cli)?;
            let saved = library.save_as(state);
            let line = format!("{}\t{}", saved.id, saved.name);
            library
                .save(library_path(cli))
                .map_err(|e| format!("failed to save preset library: {e}"))?;
            Ok(line)
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PROMPTSMITH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["promptsmith", "check", "--starter", "--json"]).unwrap();
        assert!(cli.starter);
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn starter_check_output_marks_failures() {
        let cli = Cli::try_parse_from(["promptsmith", "--starter", "check"]).unwrap();
        let out = run(&cli).unwrap();
        assert!(out.contains("[ ] Goal is clearly stated"));
        assert!(out.contains("[x] Role is defined"));
    }

    #[test]
    fn critique_apply_prints_improved_state() {
        let cli = Cli::try_parse_from(["promptsmith", "--starter", "critique", "--apply"]).unwrap();
        let improved: PromptState = serde_json::from_str(&run(&cli).unwrap()).unwrap();
        assert!(critique(&improved).is_none());
    }

    #[test]
    fn link_roundtrips_through_decode() {
        let cli = Cli::try_parse_from([
            "promptsmith",
            "--preset",
            "summarizer",
            "link",
            "--base",
            "https://example.test/b",
        ])
        .unwrap();
        let url = run(&cli).unwrap();

        let cli = Cli::try_parse_from(["promptsmith", "--link", url.as_str(), "decode"]).unwrap();
        let decoded: PromptState = serde_json::from_str(&run(&cli).unwrap()).unwrap();
        let library = PresetLibrary::builtin();
        assert_eq!(decoded, library.get("summarizer").unwrap().state);
    }

    #[test]
    fn no_suggestions_message() {
        assert_eq!(format_critique(None), "No suggestions.");
    }
}
