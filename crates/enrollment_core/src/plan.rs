use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use shared::domain::{GeneratedCoursePlan, UserProfile};

use crate::config::Settings;

#[async_trait]
pub trait PlanSource: Send + Sync {
    async fn generate(&self, profile: &UserProfile) -> anyhow::Result<GeneratedCoursePlan>;
}

/// Fills the static syllabus template after a short settle delay, so the
/// generating screen is visible for a moment even though derivation is instant.
pub struct TemplatePlanSource {
    settle_delay: Duration,
}

impl TemplatePlanSource {
    pub fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.plan_settle_delay)
    }
}

impl Default for TemplatePlanSource {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[async_trait]
impl PlanSource for TemplatePlanSource {
    async fn generate(&self, profile: &UserProfile) -> anyhow::Result<GeneratedCoursePlan> {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        syllabus::derive(profile).context("failed to derive syllabus from template")
    }
}
