//! Waitlist ("show interest") modal, independent of the enrollment views.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{InterestPhase, InterestRecord, SaveKind},
    error::FunnelError,
};
use tracing::{info, warn};

use crate::{
    config::{ConfirmationPolicy, Settings},
    save::{SaveRecord, SaveSink},
};

pub struct InterestCapture {
    phase: InterestPhase,
    is_open: bool,
    name: String,
    email: String,
    saver: Arc<dyn SaveSink>,
    close_delay: Duration,
    confirmation: ConfirmationPolicy,
}

impl InterestCapture {
    pub fn new(saver: Arc<dyn SaveSink>) -> Self {
        let defaults = Settings::default();
        Self {
            phase: InterestPhase::Idle,
            is_open: false,
            name: String::new(),
            email: String::new(),
            saver,
            close_delay: defaults.interest_close_delay,
            confirmation: defaults.interest_confirmation,
        }
    }

    pub fn from_settings(saver: Arc<dyn SaveSink>, settings: &Settings) -> Self {
        Self::new(saver)
            .with_close_delay(settings.interest_close_delay)
            .with_confirmation(settings.interest_confirmation)
    }

    pub fn with_close_delay(mut self, close_delay: Duration) -> Self {
        self.close_delay = close_delay;
        self
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationPolicy) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn phase(&self) -> InterestPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hides the modal and resets the form.
    pub fn close(&mut self) {
        self.is_open = false;
        self.phase = InterestPhase::Idle;
        self.name.clear();
        self.email.clear();
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FunnelError> {
        self.ensure_editable("edit_name")?;
        self.name = name.into();
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), FunnelError> {
        self.ensure_editable("edit_email")?;
        self.email = email.into();
        Ok(())
    }

    /// Saves the lead and shows the confirmation.
    ///
    /// Under [`ConfirmationPolicy::Optimistic`] the confirmation is shown even
    /// when the save failed; under `RequireSaved` the form returns to Idle with
    /// its fields intact.
    pub async fn submit(&mut self) -> Result<InterestPhase, FunnelError> {
        self.ensure_editable("submit")?;
        if self.name.trim().is_empty() {
            return Err(FunnelError::MissingField("name"));
        }

        let record = SaveRecord::Interest(InterestRecord {
            name: self.name.clone(),
            email: self.email.clone(),
        });
        let submitting = SubmittingGuard::enter(&mut self.phase);
        let outcome = self.saver.save(record, SaveKind::Interest).await;

        if !outcome.is_ok() {
            match self.confirmation {
                ConfirmationPolicy::Optimistic => {
                    warn!("interest save failed; confirming anyway");
                }
                ConfirmationPolicy::RequireSaved => {
                    warn!("interest save failed; keeping form open");
                    submitting.settle(InterestPhase::Idle);
                    return Err(FunnelError::SaveRejected(SaveKind::Interest));
                }
            }
        }

        info!(?outcome, "interest captured");
        submitting.settle(InterestPhase::Submitted);
        Ok(self.phase)
    }

    /// Keeps the confirmation up for the close delay, then closes the modal.
    pub async fn finish_display(&mut self) -> Result<(), FunnelError> {
        if self.phase != InterestPhase::Submitted {
            return Err(FunnelError::InvalidInterestTransition {
                from: self.phase,
                trigger: "auto_close",
            });
        }
        tokio::time::sleep(self.close_delay).await;
        self.close();
        Ok(())
    }

    fn ensure_editable(&self, trigger: &'static str) -> Result<(), FunnelError> {
        if self.is_open && self.phase == InterestPhase::Idle {
            Ok(())
        } else {
            Err(FunnelError::InvalidInterestTransition {
                from: self.phase,
                trigger,
            })
        }
    }
}

/// Holds the form in `Submitting` while the save is in flight.
///
/// A submit future dropped mid-save leaves the form back in `Idle`.
struct SubmittingGuard<'a> {
    phase: &'a mut InterestPhase,
}

impl<'a> SubmittingGuard<'a> {
    fn enter(phase: &'a mut InterestPhase) -> Self {
        *phase = InterestPhase::Submitting;
        Self { phase }
    }

    fn settle(self, next: InterestPhase) {
        *self.phase = next;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if *self.phase == InterestPhase::Submitting {
            *self.phase = InterestPhase::Idle;
        }
    }
}

#[cfg(test)]
#[path = "tests/interest_tests.rs"]
mod tests;
