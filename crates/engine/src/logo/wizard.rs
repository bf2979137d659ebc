//! Three-step logo customization wizard.
//!
//! `Position -> Method -> Upload`, forward only via an explicit continue
//! once the current step's minimum is met, backward unrestricted. The
//! terminal "finish" action never validates completeness: a customer may
//! collapse the wizard without uploading, and commit is later blocked by
//! the pricing engine's incomplete-logo rule instead of trapping them here.

use serde::{Deserialize, Serialize};
use size_grid_core::LogoMethod;

use super::{LogoAttachment, LogoSelection};

/// The wizard's ordered steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Choose at least one position.
    Position,
    /// Choose print or embroidery.
    Method,
    /// Upload a logo, or opt out explicitly.
    Upload,
}

/// Wizard state over a draft [`LogoSelection`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogoWizard {
    step: WizardStep,
    selection: LogoSelection,
    finished: bool,
}

impl LogoWizard {
    /// Start at the Position step with the given default method.
    #[must_use]
    pub fn new(default_method: LogoMethod) -> Self {
        Self {
            step: WizardStep::Position,
            selection: LogoSelection::new(default_method),
            finished: false,
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// The draft selection.
    #[must_use]
    pub const fn selection(&self) -> &LogoSelection {
        &self.selection
    }

    /// Mutable access for step interactions (toggling positions, changing
    /// method, setting notes or the no-logo flag).
    pub fn selection_mut(&mut self) -> &mut LogoSelection {
        &mut self.selection
    }

    /// Record the attachment returned by the host upload service.
    pub fn attach(&mut self, attachment: LogoAttachment) {
        self.selection.attachment = Some(attachment);
    }

    /// Discard the uploaded logo.
    pub fn remove_attachment(&mut self) {
        self.selection.attachment = None;
    }

    /// Whether the current step's minimum requirement is met.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Position => self.selection.has_positions(),
            WizardStep::Method => true,
            WizardStep::Upload => false,
        }
    }

    /// Move forward one step. Returns `false` (and stays put) when the
    /// current step's minimum is not met or this is the last step.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.step = match self.step {
            WizardStep::Position => WizardStep::Method,
            WizardStep::Method | WizardStep::Upload => WizardStep::Upload,
        };
        true
    }

    /// Move backward one step; always allowed. Returns `false` when
    /// already at the first step.
    pub fn back(&mut self) -> bool {
        self.step = match self.step {
            WizardStep::Position => return false,
            WizardStep::Method => WizardStep::Position,
            WizardStep::Upload => WizardStep::Method,
        };
        true
    }

    /// Close the wizard. Performs no completeness validation.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Whether the customer has closed the wizard.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the wizard, yielding the draft selection.
    #[must_use]
    pub fn into_selection(self) -> LogoSelection {
        self.selection
    }
}
