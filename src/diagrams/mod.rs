//! Diagram fences: language registry, jobs, the scheduler channel, and the
//! engines that compile them.

mod compiler;
mod job;
mod languages;
mod scheduler;

pub use compiler::{
    CompiledDiagram, ConfiguredCompiler, DiagramCompiler, NativeMermaidCompiler,
    TextFallbackCompiler,
};
pub use job::{DiagramJob, IdGenerator, JobStatus, SequentialIdGenerator, UuidIdGenerator};
pub use languages::{DiagramLanguage, DiagramRegistry, known_diagram_languages};
pub use scheduler::{
    DIAGRAM_STATE_ATTR, DiagramQueue, DiagramScheduler, JobOutcome, JobReport, diagram_channel,
};

/// Errors from diagram compilation. Always local to one job.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("diagram compilation failed: {0}")]
    Compile(String),

    #[error("unsupported diagram language: {0}")]
    Unsupported(String),

    #[error("diagram engine unavailable: {0}")]
    Unavailable(String),

    #[error("diagram task aborted: {0}")]
    Join(String),
}

#[cfg(test)]
mod tests;
