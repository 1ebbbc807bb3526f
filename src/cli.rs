//! CLI argument parsing using `clap`.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::scheduler::TieBreak;

/// Command-line arguments for `minmin`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "minmin",
    version,
    about = "Schedule a task DAG onto identical machines with the Min-Min heuristic.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MINMIN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Schedule a graph document and emit per-machine timelines.
    Schedule {
        /// Graph document (JSON with a `tasks` array).
        #[arg(long, short, value_name = "PATH")]
        input: PathBuf,

        /// Number of machines.
        #[arg(long, short, value_name = "N", default_value_t = 1)]
        machines: usize,

        /// Where to write the schedule. Printed to stdout when omitted.
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Order used to break ties between ready tasks.
        #[arg(long, value_enum, default_value_t = TieBreakArg::Id)]
        tie_break: TieBreakArg,

        /// Validate the graph and report every problem before scheduling.
        #[arg(long)]
        validate: bool,
    },

    /// Generate a random acyclic graph document.
    Generate {
        /// Number of tasks.
        #[arg(long, value_name = "N")]
        num_tasks: usize,

        /// Maximum dependencies per task (random when omitted).
        #[arg(long, value_name = "D")]
        max_dependencies: Option<usize>,

        /// RNG seed (random when omitted; recorded in the document).
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Where to write the graph. Printed to stdout when omitted.
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Case-insensitive; also accepts `warning`.
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Tie-break order as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    Id,
    Declaration,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Id => TieBreak::Id,
            TieBreakArg::Declaration => TieBreak::Declaration,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule() {
        let args = CliArgs::try_parse_from([
            "minmin",
            "schedule",
            "--input",
            "graph.json",
            "--machines",
            "4",
            "--tie-break",
            "declaration",
        ])
        .unwrap();

        match args.command {
            Command::Schedule {
                input,
                machines,
                output,
                tie_break,
                validate,
            } => {
                assert_eq!(input, PathBuf::from("graph.json"));
                assert_eq!(machines, 4);
                assert!(output.is_none());
                assert_eq!(TieBreak::from(tie_break), TieBreak::Declaration);
                assert!(!validate);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_generate_with_global_log_level() {
        let args = CliArgs::try_parse_from([
            "minmin",
            "generate",
            "--num-tasks",
            "100",
            "--seed",
            "9",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        match args.command {
            Command::Generate {
                num_tasks,
                max_dependencies,
                seed,
                ..
            } => {
                assert_eq!(num_tasks, 100);
                assert_eq!(max_dependencies, None);
                assert_eq!(seed, Some(9));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!(" warning ".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(CliArgs::try_parse_from(["minmin", "schedule"]).is_err());
    }
}
