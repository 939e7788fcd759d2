//! Implementations of the `chatmark` subcommands.

use crate::diagrams::{
    ConfiguredCompiler, DiagramJob, DiagramRegistry, JobOutcome, JobReport, diagram_channel,
};
use crate::markdown::{MarkdownCompiler, RenderMode, RenderOptions};
use crate::search::{HighlightEngine, HighlightOptions};
use anyhow::{Context, Result};
use chatmark_config::Config;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::Path;

use super::RenderArgs;

/// What one `render` invocation produced.
#[derive(Debug, Default)]
pub struct RenderOutput {
    /// Markup, or text content with `--text`.
    pub output: String,
    pub reports: Vec<JobReport>,
    pub highlights: usize,
}

/// JSON row for `--jobs-json`.
#[derive(Serialize)]
struct JobSummary<'a> {
    #[serde(flatten)]
    job: &'a DiagramJob,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a JobReport> for JobSummary<'a> {
    fn from(report: &'a JobReport) -> Self {
        let (outcome, error) = match &report.outcome {
            JobOutcome::Applied => ("applied", None),
            JobOutcome::Failed(e) => ("failed", Some(e.as_str())),
            JobOutcome::TargetMissing => ("target_missing", None),
        };
        Self {
            job: &report.job,
            outcome,
            error,
        }
    }
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

/// Run the render pipeline for one message.
pub async fn render_message(source: &str, args: &RenderArgs, config: &Config) -> Result<RenderOutput> {
    let mut compiler = MarkdownCompiler::from_config(config);

    if args.text {
        return Ok(RenderOutput {
            output: compiler.to_plain_text(source),
            ..RenderOutput::default()
        });
    }

    let options = RenderOptions {
        is_generating: args.generating,
        mode: if args.plain {
            RenderMode::Plain
        } else {
            RenderMode::Interactive
        },
    };

    let mut queue = None;
    if args.compile_diagrams {
        let (scheduler, q) = diagram_channel();
        compiler = compiler.with_scheduler(scheduler);
        queue = Some(q);
    }

    let mut doc = compiler.render_document(source, options);

    let mut reports = Vec::new();
    if let Some(mut queue) = queue {
        let engine = ConfiguredCompiler::from_engine(config.diagrams.engine);
        reports = queue.run_tick(&engine, &mut doc).await;
        for report in &reports {
            log::info!(
                "diagram {} ({}): {:?}",
                report.job.id,
                report.job.language,
                report.outcome
            );
        }
    }

    let mut highlights = 0;
    if let Some(term) = args.highlight.as_deref() {
        let mut engine = HighlightEngine::new(HighlightOptions::from_config(&config.search));
        highlights = engine.highlight_document(&mut doc, term);
        crate::debug_log!("SEARCH", "highlighted {highlights} match(es) of {term:?}");
    }

    Ok(RenderOutput {
        output: doc.to_html(),
        reports,
        highlights,
    })
}

/// `chatmark render`
pub fn render_cli(args: &RenderArgs, config: &Config) -> Result<()> {
    let source = read_source(args.file.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let rendered = runtime.block_on(render_message(&source, args, config))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.output)?;

    if args.jobs_json {
        let summaries: Vec<JobSummary<'_>> = rendered.reports.iter().map(Into::into).collect();
        eprintln!("{}", serde_json::to_string_pretty(&summaries)?);
    }
    Ok(())
}

/// `chatmark languages`
pub fn languages_cli(config: &Config) -> Result<()> {
    if !config.diagrams.enabled {
        println!("diagram compilation is disabled");
        return Ok(());
    }
    let registry = DiagramRegistry::from_tags(config.diagrams.languages.as_slice());
    for lang in registry.languages() {
        let engine = if lang.native { "native" } else { "source only" };
        println!("{:<12} {:<16} {engine}", lang.tag, lang.display_name);
    }
    Ok(())
}

/// `chatmark show-config`
pub fn show_config_cli(config: &Config) -> Result<()> {
    print!("{}", serde_yaml_ng::to_string(config)?);
    Ok(())
}
