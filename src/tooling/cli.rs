//! CLI Tooling
//!
//! Command-line interface over a config tree store: inspect the tree, query
//! nodes, validate snapshots and replay action files.

use crate::config::ConsoleConfig;
use crate::error::{ApiError, TreeError};
use crate::format::{
    format_section_heading, format_tree_outline, format_tree_table, format_validate_text,
};
use crate::snapshot::{load_actions, load_tree, save_tree};
use crate::store::{ActionKind, ConfigTreeStore};
use crate::tree::hasher::fingerprint_hex;
use crate::tree::seed::default_tree;
use crate::tree::validate::validate_tree;
use crate::views::{current_view, tree_rows};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Config tree store CLI
#[derive(Parser)]
#[command(name = "configtree")]
#[command(about = "Inspect and edit configuration trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tree snapshot to load (JSON or YAML); the built-in sample tree when omitted
    #[arg(long)]
    pub tree: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of loaded configuration.
    pub fn apply_logging_overrides(&self, config: &mut ConsoleConfig) {
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(ref format) = self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(ref output) = self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(ref file) = self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the tree
    Show {
        /// Output format (text, table or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print a file node's content
    Cat {
        /// Node id
        id: String,
    },
    /// Print the id chain from the root to a node
    Chain {
        /// Node id
        id: String,
    },
    /// Check tree invariants
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the tree fingerprint
    Fingerprint,
    /// Replay an action file (JSON or YAML list) against the tree
    Apply {
        /// Action file
        actions: PathBuf,
        /// Reject ill-formed actions instead of ignoring them
        #[arg(long)]
        checked: bool,
        /// Write the resulting tree to this snapshot file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Summary of an `apply` run.
#[derive(Debug, Clone, Serialize)]
pub struct ApplySummary {
    pub applied: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub fingerprint_before: String,
    pub fingerprint_after: String,
    pub node_count: usize,
    pub current_id_chain: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
}

/// CLI context: loaded configuration plus the store commands run against.
pub struct CliContext {
    config: ConsoleConfig,
    store: ConfigTreeStore,
}

impl CliContext {
    /// Build a context over loaded configuration.
    ///
    /// `tree` wins over `tree.snapshot` from configuration.
    pub fn with_config(config: ConsoleConfig, tree: Option<PathBuf>) -> Result<Self, ApiError> {
        let snapshot = tree.or_else(|| config.tree.snapshot.clone());
        let root = match snapshot {
            Some(ref path) => load_tree(path)?,
            None => default_tree(),
        };
        Ok(Self {
            config,
            store: ConfigTreeStore::with_root(root),
        })
    }

    pub fn store(&self) -> &ConfigTreeStore {
        &self.store
    }

    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Show { format } => self.show(format),
            Commands::Cat { id } => self.cat(id),
            Commands::Chain { id } => self.chain(id),
            Commands::Validate { format } => self.validate(format),
            Commands::Fingerprint => Ok(fingerprint_hex(self.store.state().root())),
            Commands::Apply {
                actions,
                checked,
                out,
                format,
            } => self.apply(actions, *checked, out.as_deref(), format),
        }
    }

    fn show(&self, format: &str) -> Result<String, ApiError> {
        let state = self.store.state();
        let rows = tree_rows(state);
        match format {
            "text" => Ok(format_tree_outline(&rows, std::io::stdout().is_terminal())),
            "table" => Ok(format_tree_table(&rows)),
            "json" => {
                let body = json!({
                    "rootConfig": state.root().as_ref(),
                    "currentIdChain": state.current_id_chain(),
                    "current": current_view(state),
                });
                Ok(serde_json::to_string_pretty(&body)?)
            }
            other => Err(invalid_format(other, &["text", "table", "json"])),
        }
    }

    fn cat(&self, id: &str) -> Result<String, ApiError> {
        let entry = self
            .store
            .state()
            .walk()
            .find(|entry| entry.node.id == id)
            .ok_or_else(|| TreeError::NotFound { id: id.to_string() })?;
        if entry.node.is_folder() {
            return Err(ApiError::ConfigError(format!(
                "Node {} is a folder; use `show` to list it",
                id
            )));
        }
        Ok(entry.node.content.clone())
    }

    fn chain(&self, id: &str) -> Result<String, ApiError> {
        let chain = self
            .store
            .state()
            .find_chain(id)
            .ok_or_else(|| TreeError::NotFound { id: id.to_string() })?;
        Ok(chain.join(" / "))
    }

    fn validate(&self, format: &str) -> Result<String, ApiError> {
        let result = validate_tree(self.store.state().root());
        match format {
            "text" => Ok(format_validate_text(&result)),
            "json" => Ok(serde_json::to_string_pretty(&result)?),
            other => Err(invalid_format(other, &["text", "json"])),
        }
    }

    fn apply(
        &mut self,
        actions_path: &Path,
        checked: bool,
        out: Option<&Path>,
        format: &str,
    ) -> Result<String, ApiError> {
        if format != "text" && format != "json" {
            return Err(invalid_format(format, &["text", "json"]));
        }
        let actions = load_actions(actions_path)?;
        let checked = checked || self.config.tree.checked_dispatch;
        let fingerprint_before = fingerprint_hex(self.store.state().root());
        info!(
            path = %actions_path.display(),
            count = actions.len(),
            checked,
            "Replaying config actions"
        );

        let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for (index, action) in actions.iter().enumerate() {
            if checked {
                self.store.try_dispatch(action).map_err(|err| {
                    warn!(index, action = %action.kind(), error = %err, "Replay stopped");
                    err
                })?;
            } else {
                self.store.dispatch(action);
            }
            *by_kind.entry(action.kind().to_string()).or_insert(0) += 1;
        }

        let written_to = match out {
            Some(path) => {
                save_tree(path, self.store.state().root())?;
                Some(path.display().to_string())
            }
            None => None,
        };

        let state = self.store.state();
        let summary = ApplySummary {
            applied: actions.len(),
            by_kind,
            fingerprint_before,
            fingerprint_after: fingerprint_hex(state.root()),
            node_count: state.len(),
            current_id_chain: state.current_id_chain().to_vec(),
            written_to,
        };

        if format == "json" {
            return Ok(serde_json::to_string_pretty(&summary)?);
        }
        Ok(format_apply_text(&summary))
    }
}

fn format_apply_text(summary: &ApplySummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Replay")));
    out.push_str(&format!("  Applied: {}\n", summary.applied));
    for kind in [
        ActionKind::Create,
        ActionKind::Duplicate,
        ActionKind::Update,
        ActionKind::Delete,
        ActionKind::SetCurrentChain,
    ] {
        if let Some(count) = summary.by_kind.get(&kind.to_string()) {
            out.push_str(&format!("    {}: {}\n", kind, count));
        }
    }
    out.push_str(&format!("  Nodes: {}\n", summary.node_count));
    out.push_str(&format!(
        "  Current chain: {}\n",
        summary.current_id_chain.join(" / ")
    ));
    let changed = summary.fingerprint_before != summary.fingerprint_after;
    out.push_str(&format!(
        "  Tree changed: {}\n",
        if changed { "yes" } else { "no" }
    ));
    if let Some(ref path) = summary.written_to {
        out.push_str(&format!("  Written to: {}\n", path));
    }
    out
}

fn invalid_format(format: &str, allowed: &[&str]) -> ApiError {
    ApiError::ConfigError(format!(
        "Invalid output format: {} (must be one of {})",
        format,
        allowed.join(", ")
    ))
}
