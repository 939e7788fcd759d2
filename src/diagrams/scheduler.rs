//! Diagram Job Scheduler: hands jobs from a render pass to the next tick.
//!
//! Rendering only enqueues. Compilation happens in [`DiagramQueue::run_tick`],
//! which the host calls after it has inserted the rendered markup, because a
//! job resolves against its placeholder element in that document. A job
//! whose placeholder is gone by then is dropped without compiling; this is
//! the only cancellation there is.

use super::compiler::DiagramCompiler;
use super::job::{DiagramJob, JobStatus};
use crate::dom::{Document, parse_fragment};
use futures::future::join_all;
use tokio::sync::mpsc;

/// Attribute recording how a placeholder was resolved.
pub const DIAGRAM_STATE_ATTR: &str = "data-diagram-state";

/// Create a connected scheduler/queue pair.
pub fn diagram_channel() -> (DiagramScheduler, DiagramQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DiagramScheduler { tx }, DiagramQueue { rx })
}

/// Sending half, held by the markdown compiler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DiagramScheduler {
    tx: mpsc::UnboundedSender<DiagramJob>,
}

impl DiagramScheduler {
    /// Enqueue a job. Never blocks. Returns `false` if the queue was dropped,
    /// in which case the placeholder simply keeps its source display.
    pub fn schedule(&self, job: DiagramJob) -> bool {
        crate::debug_log!(
            "DIAGRAM",
            "scheduled job {} -> #{}",
            job.id,
            job.target_element_id
        );
        match self.tx.send(job) {
            Ok(()) => true,
            Err(mpsc::error::SendError(job)) => {
                log::trace!("diagram queue closed, job {} dropped", job.id);
                false
            }
        }
    }
}

/// How a job resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Placeholder content replaced with the compiled graphic.
    Applied,
    /// Compilation failed; placeholder keeps the highlighted source.
    Failed(String),
    /// Placeholder no longer in the document; nothing was done.
    TargetMissing,
}

/// Result of one job after a tick. The job is discarded after reporting.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub job: DiagramJob,
    pub outcome: JobOutcome,
}

/// Receiving half, owned by whoever owns the displayed document.
#[derive(Debug)]
pub struct DiagramQueue {
    rx: mpsc::UnboundedReceiver<DiagramJob>,
}

impl DiagramQueue {
    /// Take every job scheduled so far without compiling anything.
    pub fn drain_pending(&mut self) -> Vec<DiagramJob> {
        let mut jobs = Vec::new();
        while let Ok(job) = self.rx.try_recv() {
            jobs.push(job);
        }
        jobs
    }

    /// Run one scheduling tick against `doc`.
    ///
    /// Jobs are compiled concurrently with no ordering between them, then
    /// each is resolved against its placeholder. Failures stay local to their
    /// job.
    pub async fn run_tick<C: DiagramCompiler>(
        &mut self,
        compiler: &C,
        doc: &mut Document,
    ) -> Vec<JobReport> {
        let jobs = self.drain_pending();
        if jobs.is_empty() {
            return Vec::new();
        }
        crate::debug_info!("DIAGRAM", "tick: {} pending job(s)", jobs.len());

        let (live, missing): (Vec<DiagramJob>, Vec<DiagramJob>) = jobs
            .into_iter()
            .partition(|job| doc.find_by_id(&job.target_element_id).is_some());

        let mut reports: Vec<JobReport> = missing
            .into_iter()
            .map(|job| {
                log::trace!(
                    "diagram job {}: target #{} gone, skipping",
                    job.id,
                    job.target_element_id
                );
                JobReport {
                    job,
                    outcome: JobOutcome::TargetMissing,
                }
            })
            .collect();

        let results = join_all(
            live.iter()
                .map(|job| compiler.compile(&job.language, &job.raw_source)),
        )
        .await;

        for (mut job, result) in live.into_iter().zip(results) {
            let Some(placeholder) = doc.find_by_id_mut(&job.target_element_id) else {
                reports.push(JobReport {
                    job,
                    outcome: JobOutcome::TargetMissing,
                });
                continue;
            };
            let outcome = match result {
                Ok(diagram) => {
                    placeholder.replace_children(parse_fragment(&diagram.svg));
                    placeholder.set_attr(DIAGRAM_STATE_ATTR, "rendered");
                    compiler.bind(placeholder, &diagram);
                    job.status = JobStatus::Succeeded;
                    JobOutcome::Applied
                }
                Err(e) => {
                    log::warn!("diagram job {} failed: {}", job.id, e);
                    crate::debug_error!("DIAGRAM", "job {} failed: {}", job.id, e);
                    placeholder.set_attr(DIAGRAM_STATE_ATTR, "failed");
                    job.status = JobStatus::Failed;
                    JobOutcome::Failed(e.to_string())
                }
            };
            reports.push(JobReport { job, outcome });
        }
        reports
    }
}
