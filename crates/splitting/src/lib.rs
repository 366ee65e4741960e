//! Split one video into named clips from an ordered timestamp list,
//! delegating the actual media work to an external backend (ffmpeg).

pub mod backend;
pub mod naming;
pub mod planner;
pub mod timecode;
pub mod timeline;

use std::path::Path;

use strum::{Display, EnumString, VariantNames};
use thiserror::Error;
use tracing::{error, info, warn};

pub use backend::{BackendError, MediaBackend};
pub use naming::NameTemplate;
pub use planner::{ClipPlan, plan_clips};
pub use timecode::Timecode;
pub use timeline::{Timeline, TimestampEntry};

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("invalid timestamp file: {0}")]
    InvalidTimestampFile(#[from] timeline::TimelineError),
    #[error("invalid output template: {0}")]
    InvalidTemplate(#[from] naming::TemplateError),
    #[error("source file not found: {0}")]
    SourceNotFound(String),
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: String,
        source: std::io::Error,
    },
    #[error("{failed} of {total} clips failed")]
    ClipsFailed { failed: usize, total: usize },
}

/// What to do when a single cut fails. Either way the run as a whole fails
/// once any clip has failed; the policy only decides whether the remaining
/// clips are still attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failed clip and keep cutting the rest
    #[default]
    Continue,
    /// Stop at the first failed cut
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
}

/// Drives a whole split: probe once, plan once, cut once per planned clip,
/// sequentially. Generic over the backend so the orchestration can be tested
/// against a canned one.
pub struct Runner<B: MediaBackend> {
    backend: B,
    policy: FailurePolicy,
}

impl<B: MediaBackend> Runner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn run(
        &self,
        source: &Path,
        timeline: &Timeline,
        output_dir: &Path,
        template: &NameTemplate,
    ) -> Result<RunSummary, SplitError> {
        if timeline.is_empty() {
            info!("timestamp file has no entries, nothing to do");
            return Ok(RunSummary::default());
        }

        if !source.exists() {
            return Err(SplitError::SourceNotFound(source.display().to_string()));
        }

        let duration = self.backend.probe_duration(source)?;
        let plans = plan_clips(
            timeline.entries(),
            Timecode::from_secs_f64(duration),
            template,
        );

        std::fs::create_dir_all(output_dir).map_err(|source| SplitError::OutputDir {
            path: output_dir.display().to_string(),
            source,
        })?;

        let mut failed = 0usize;
        for plan in &plans {
            if plan.end <= plan.start {
                // Entry order is taken as-is; flag the ones that cannot be
                // chronological.
                warn!(
                    "clip {} ({:?}) has non-positive length: {} -> {}",
                    plan.index, plan.label, plan.start, plan.end
                );
            }

            let output = output_dir.join(&plan.output_name);
            info!(
                "cutting clip {}/{} {:?}: {} -> {}",
                plan.index,
                plans.len(),
                plan.label,
                plan.start,
                plan.end
            );

            match self.backend.cut(source, plan.start, plan.end, &output) {
                Ok(()) => info!("created clip: {}", output.display()),
                Err(e) => {
                    failed += 1;
                    error!("clip {} failed: {e}", plan.index);
                    if self.policy == FailurePolicy::Abort {
                        return Err(SplitError::Backend(e));
                    }
                }
            }
        }

        if failed > 0 {
            return Err(SplitError::ClipsFailed {
                failed,
                total: plans.len(),
            });
        }

        Ok(RunSummary {
            created: plans.len(),
        })
    }
}
