//! CLI command definitions for the `recall-stack` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod memory;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use recall_types::memory::{NewMemoryLog, RecallFilter};

use crate::telemetry::LogFormat;

/// Store and recall agent action/reason/outcome memories.
#[derive(Parser)]
#[command(name = "recall-stack", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Config file (defaults to ./recall_stack.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file.
    #[arg(long, global = true, env = "RECALL_DATABASE")]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on.
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// Store a single memory log.
    Log(LogArgs),

    /// Recall memory logs matching the given filters.
    Recall(RecallArgs),
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(long)]
    pub agent_id: String,

    #[arg(long)]
    pub session_id: String,

    #[arg(long)]
    pub context_id: Option<String>,

    /// What the agent did.
    #[arg(long)]
    pub action: String,

    /// Why the agent did it.
    #[arg(long)]
    pub reason: String,

    #[arg(long)]
    pub outcome: Option<String>,

    /// Tag to attach (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub decay_score: Option<f64>,

    /// Logical event time (defaults to now).
    #[arg(long)]
    pub timestamp: Option<String>,
}

impl From<LogArgs> for NewMemoryLog {
    fn from(args: LogArgs) -> Self {
        NewMemoryLog {
            agent_id: args.agent_id,
            session_id: args.session_id,
            context_id: args.context_id,
            action: args.action,
            reason: args.reason,
            outcome: args.outcome,
            tags: Some(args.tags),
            decay_score: args.decay_score,
            timestamp: args.timestamp,
        }
    }
}

#[derive(Args)]
pub struct RecallArgs {
    #[arg(long)]
    pub agent_id: Option<String>,

    #[arg(long)]
    pub session_id: Option<String>,

    #[arg(long)]
    pub context_id: Option<String>,

    /// Substring of the action.
    #[arg(long)]
    pub action: Option<String>,

    /// Substring of the reason.
    #[arg(long)]
    pub reason: Option<String>,

    /// Substring of the outcome.
    #[arg(long)]
    pub outcome: Option<String>,

    #[arg(long)]
    pub tag: Option<String>,

    /// Minimum decay score (0 disables the bound).
    #[arg(long)]
    pub min_decay: Option<f64>,

    /// timestamp, decay_score or created_at.
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Maximum results.
    #[arg(long)]
    pub limit: Option<i64>,
}

impl From<RecallArgs> for RecallFilter {
    fn from(args: RecallArgs) -> Self {
        RecallFilter {
            agent_id: args.agent_id,
            session_id: args.session_id,
            context_id: args.context_id,
            action: args.action,
            reason: args.reason,
            outcome: args.outcome,
            tag: args.tag,
            min_decay: args.min_decay,
            sort_by: args.sort_by,
            limit: args.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_args_into_request() {
        let cli = Cli::try_parse_from([
            "recall-stack",
            "log",
            "--agent-id",
            "A1",
            "--session-id",
            "S1",
            "--action",
            "fetch",
            "--reason",
            "test",
            "--tag",
            "x",
            "--tag",
            "y",
        ])
        .unwrap();

        let Commands::Log(args) = cli.command else {
            panic!("expected log command");
        };
        let request: NewMemoryLog = args.into();
        assert_eq!(request.agent_id, "A1");
        assert_eq!(request.tags, Some(vec!["x".to_string(), "y".to_string()]));
        assert!(request.decay_score.is_none());
    }

    #[test]
    fn test_recall_args_into_filter() {
        let cli = Cli::try_parse_from([
            "recall-stack",
            "recall",
            "--agent-id",
            "A1",
            "--min-decay",
            "0.5",
            "--sort-by",
            "decay_score",
            "--limit",
            "5",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);

        let Commands::Recall(args) = cli.command else {
            panic!("expected recall command");
        };
        let filter: RecallFilter = args.into();
        assert_eq!(filter.agent_id.as_deref(), Some("A1"));
        assert_eq!(filter.min_decay, Some(0.5));
        assert_eq!(filter.limit, Some(5));
        assert!(filter.tag.is_none());
    }

    #[test]
    fn test_log_requires_reason() {
        let result = Cli::try_parse_from([
            "recall-stack",
            "log",
            "--agent-id",
            "A1",
            "--session-id",
            "S1",
            "--action",
            "fetch",
        ]);
        assert!(result.is_err());
    }
}
