//! Wizard session state machine
//!
//! Owns the step index and the draft configuration, nothing else: no
//! history stack, no replayed render state. A retreat followed by an
//! advance re-projects the step fresh from current draft values.

use chrono::Utc;
use tracing::{info, warn};

use crate::config::DraftConfig;
use crate::error::{Error, Result};
use crate::settings::{SettingsStore, WizardSettings};
use crate::steps::{builtin_steps, StepView, WizardStep};

/// Outcome of applying one downstream tool's configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub tool: String,
    pub error: Option<String>,
}

impl ToolOutcome {
    pub fn ok(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            error: None,
        }
    }

    pub fn failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Report of the finish transition, one outcome per tool attempted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinishReport {
    pub outcomes: Vec<ToolOutcome>,
}

impl FinishReport {
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(ToolOutcome::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ToolOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}

/// Applies the final draft to every downstream tool.
///
/// Implementations run each tool independently: one tool's failure must
/// not prevent the others from being attempted.
pub trait FinishHandler {
    fn apply(&self, draft: &DraftConfig) -> Vec<ToolOutcome>;
}

impl<F> FinishHandler for F
where
    F: Fn(&DraftConfig) -> Vec<ToolOutcome>,
{
    fn apply(&self, draft: &DraftConfig) -> Vec<ToolOutcome> {
        self(draft)
    }
}

/// Result of a navigation request.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Moved to the given step index.
    Moved(usize),
    /// The transition was not permitted; the index is unchanged.
    Blocked,
    /// The final step completed and every synthesizer ran.
    Finished(FinishReport),
}

/// An active wizard session over one draft configuration.
pub struct WizardSession<'a> {
    steps: Vec<Box<dyn WizardStep>>,
    index: usize,
    draft: DraftConfig,
    settings: &'a dyn SettingsStore,
}

impl<'a> WizardSession<'a> {
    /// Open a session over the built-in step pipeline.
    pub fn new(draft: DraftConfig, settings: &'a dyn SettingsStore) -> Self {
        Self::with_steps(draft, settings, builtin_steps())
    }

    /// Open a session over a custom step pipeline.
    pub fn with_steps(
        draft: DraftConfig,
        settings: &'a dyn SettingsStore,
        steps: Vec<Box<dyn WizardStep>>,
    ) -> Self {
        Self {
            steps,
            index: 0,
            draft,
            settings,
        }
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> &dyn WizardStep {
        self.steps[self.index].as_ref()
    }

    pub fn draft(&self) -> &DraftConfig {
        &self.draft
    }

    /// The active step owns write access to the fields it renders.
    pub fn draft_mut(&mut self) -> &mut DraftConfig {
        &mut self.draft
    }

    /// Re-project the current step from the current draft.
    pub fn view(&self) -> StepView {
        self.current_step().view(&self.draft)
    }

    /// Validated forward transition.
    ///
    /// On success the draft snapshot is opportunistically persisted so a
    /// closed-and-reopened wizard resumes mid-flow; a snapshot failure is
    /// logged and never blocks navigation. Advancing past the last step
    /// triggers `finish`.
    pub fn advance(&mut self, handler: &dyn FinishHandler) -> Result<Transition> {
        if !self.current_step().validate(&self.draft) {
            return Ok(Transition::Blocked);
        }
        if self.index + 1 == self.steps.len() {
            return Ok(Transition::Finished(self.finish(handler)?));
        }

        self.persist_snapshot();
        self.index += 1;
        Ok(Transition::Moved(self.index))
    }

    /// Backward transition. Always permitted, never validates, never
    /// persists.
    pub fn retreat(&mut self) -> Transition {
        if self.index == 0 {
            return Transition::Blocked;
        }
        self.index -= 1;
        Transition::Moved(self.index)
    }

    /// Forward transition without validation and without the early
    /// persistence side effect. In-memory edits on the skipped step are
    /// kept; nothing is flushed to disk.
    pub fn skip(&mut self) -> Transition {
        if self.index + 1 >= self.steps.len() {
            return Transition::Blocked;
        }
        self.index += 1;
        Transition::Moved(self.index)
    }

    /// Apply the final draft: validate the last step, run every tool
    /// synthesizer sequentially, then persist the completed snapshot.
    ///
    /// Runs to completion once started; per-tool failures are collected
    /// in the report rather than aborting the rest.
    pub fn finish(&mut self, handler: &dyn FinishHandler) -> Result<FinishReport> {
        let last = self.steps.len() - 1;
        if !self.steps[last].validate(&self.draft) {
            return Err(Error::StepValidation {
                step: self.steps[last].title().to_string(),
            });
        }

        let report = FinishReport {
            outcomes: handler.apply(&self.draft),
        };
        for failure in report.failures() {
            warn!(tool = %failure.tool, error = ?failure.error, "tool apply failed");
        }

        let mut snapshot = WizardSettings::from_draft(&self.draft);
        snapshot.wizard_completed = true;
        snapshot.applied_at = Some(Utc::now());
        self.settings.save(&snapshot)?;

        info!(
            tools = report.outcomes.len(),
            failures = report.failures().count(),
            "wizard finished"
        );
        Ok(report)
    }

    /// Close the session, discarding the draft. Nothing is persisted
    /// beyond what earlier `advance` transitions already flushed.
    pub fn cancel(self) {}

    fn persist_snapshot(&self) {
        let mut snapshot = WizardSettings::from_draft(&self.draft);
        // Completion state survives a re-entered wizard's early saves.
        match self.settings.load() {
            Ok(Some(previous)) => {
                snapshot.wizard_completed = previous.wizard_completed;
                snapshot.applied_at = previous.applied_at;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "could not read previous settings snapshot"),
        }
        if let Err(e) = self.settings.save(&snapshot) {
            warn!(error = %e, "mid-flow settings snapshot failed");
        }
    }
}
