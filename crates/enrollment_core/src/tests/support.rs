//! Fakes shared by the crate's unit tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::anyhow;
use async_trait::async_trait;
use shared::domain::{
    CohortOption, ExperienceLevel, GeneratedCoursePlan, PaymentMethod, SaveKind, UserProfile,
};
use tokio::sync::mpsc;

use crate::{
    plan::PlanSource,
    save::{SaveOutcome, SaveRecord, SaveSink},
};

pub(crate) fn profile(name: &str, cohort: CohortOption) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        email: "alex@example.com".to_string(),
        phone: "+91 98765 43210".to_string(),
        experience: ExperienceLevel::Beginner,
        cohort,
        payment_method: PaymentMethod::Upi,
    }
}

/// Records every save and reports completion on a channel.
pub(crate) struct RecordingSaver {
    outcome: SaveOutcome,
    delay: Duration,
    finished: Mutex<Vec<(SaveRecord, SaveKind)>>,
    done_tx: mpsc::UnboundedSender<SaveKind>,
}

impl RecordingSaver {
    pub(crate) fn new(outcome: SaveOutcome) -> (Arc<Self>, mpsc::UnboundedReceiver<SaveKind>) {
        Self::with_delay(outcome, Duration::ZERO)
    }

    pub(crate) fn with_delay(
        outcome: SaveOutcome,
        delay: Duration,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SaveKind>) {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let saver = Arc::new(Self {
            outcome,
            delay,
            finished: Mutex::new(Vec::new()),
            done_tx,
        });
        (saver, done_rx)
    }

    pub(crate) fn finished(&self) -> Vec<(SaveRecord, SaveKind)> {
        self.finished.lock().expect("saver lock").clone()
    }
}

#[async_trait]
impl SaveSink for RecordingSaver {
    async fn save(&self, record: SaveRecord, kind: SaveKind) -> SaveOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.finished.lock().expect("saver lock").push((record, kind));
        let _ = self.done_tx.send(kind);
        self.outcome
    }
}

pub(crate) struct FailingPlanSource;

#[async_trait]
impl PlanSource for FailingPlanSource {
    async fn generate(&self, _profile: &UserProfile) -> anyhow::Result<GeneratedCoursePlan> {
        Err(anyhow!("syllabus backend unavailable"))
    }
}
