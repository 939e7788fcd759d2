//! Command-line interface for chatmark.
//!
//! This module handles CLI argument parsing and dispatches subcommands.
//! The render pipeline driver lives in the [`render`] submodule.

pub mod render;

use anyhow::Result;
use chatmark_config::{Config, LogLevel};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// chatmark - Render chat-message markdown to interactive markup
#[derive(Parser)]
#[command(name = "chatmark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to load (default: ~/.config/chatmark/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a markdown message (from FILE or stdin) and print the markup
    Render(RenderArgs),

    /// List the fence tags treated as diagrams
    Languages,

    /// Print the effective configuration as YAML
    ShowConfig,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Markdown file to render; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Treat the input as a partially streamed response
    #[arg(long)]
    pub generating: bool,

    /// Omit copy controls and diagram placeholders
    #[arg(long)]
    pub plain: bool,

    /// Print the text content instead of markup
    #[arg(long, conflicts_with_all = ["highlight", "compile_diagrams"])]
    pub text: bool,

    /// Wrap case-insensitive matches of TERM in highlight spans
    #[arg(long, value_name = "TERM")]
    pub highlight: Option<String>,

    /// Run one diagram scheduling tick before printing
    #[arg(long)]
    pub compile_diagrams: bool,

    /// Print diagram job reports as JSON on stderr
    #[arg(long, requires = "compile_diagrams")]
    pub jobs_json: bool,
}

/// Load the config named on the command line, or the default one.
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Parse arguments, initialize logging, and run the selected command.
/// Returns the process exit code.
pub fn process_cli() -> i32 {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("chatmark: error: {e:#}");
            return 2;
        }
    };

    // Precedence: --log-level, then RUST_LOG / DEBUG_LEVEL, then the config file.
    let level = cli.log_level.map(|l| l.to_level_filter()).or_else(|| {
        let env_set =
            std::env::var_os("RUST_LOG").is_some() || std::env::var_os("DEBUG_LEVEL").is_some();
        (!env_set && config.log_level != LogLevel::Off)
            .then(|| config.log_level.to_level_filter())
    });
    crate::debug::init_log_bridge(level);
    log::info!("chatmark {} starting", crate::VERSION);

    let result = match cli.command {
        Commands::Render(args) => render::render_cli(&args, &config),
        Commands::Languages => render::languages_cli(&config),
        Commands::ShowConfig => render::show_config_cli(&config),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("command failed: {e:#}");
            eprintln!("chatmark: error: {e:#}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_config::DiagramEngine;

    #[test]
    fn test_render_flags_parse() {
        let cli = Cli::try_parse_from([
            "chatmark",
            "render",
            "notes.md",
            "--generating",
            "--highlight",
            "error",
            "--log-level",
            "debug",
        ])
        .expect("valid arguments");
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.file, Some(PathBuf::from("notes.md")));
        assert!(args.generating);
        assert_eq!(args.highlight.as_deref(), Some("error"));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
    }

    #[test]
    fn test_jobs_json_requires_compile_flag() {
        assert!(Cli::try_parse_from(["chatmark", "render", "--jobs-json"]).is_err());
        assert!(
            Cli::try_parse_from(["chatmark", "render", "--compile-diagrams", "--jobs-json"])
                .is_ok()
        );
    }

    #[test]
    fn test_text_conflicts_with_highlight() {
        assert!(Cli::try_parse_from(["chatmark", "render", "--text", "--highlight", "x"]).is_err());
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "diagrams:\n  engine: text_fallback\n").expect("write");

        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.diagrams.engine, DiagramEngine::TextFallback);
        assert!(config.markdown.linkify);
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(Some(&dir.path().join("absent.yaml"))).expect("load");
        assert_eq!(config, Config::default());
    }
}
