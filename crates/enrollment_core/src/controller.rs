//! View controller: the enrollment funnel's state machine.
//!
//! [`ViewState`] is a plain reducer with no I/O, so every transition can be
//! exercised directly. [`EnrollmentController`] wraps it with the async work a
//! submission triggers: the enrollment save and the single plan derivation.

use std::{mem, sync::Arc};

use shared::{
    domain::{GeneratedCoursePlan, SaveKind, UserProfile, View},
    error::FunnelError,
};
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use crate::{
    config::DispatchPolicy,
    plan::PlanSource,
    save::{SaveRecord, SaveSink},
};

const VIEW_EVENT_CAPACITY: usize = 16;

/// Current view together with the data it owns.
///
/// Success can only be built from a Generating state plus a plan, so a
/// rendered success screen always has both a profile and a plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Landing,
    Enrolling,
    Generating {
        profile: UserProfile,
    },
    Success {
        profile: UserProfile,
        plan: GeneratedCoursePlan,
    },
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Start,
    Back,
    Submit(UserProfile),
    PlanReady(GeneratedCoursePlan),
    PlanFailed,
    Retry,
    Restart,
}

impl ViewAction {
    pub fn trigger(&self) -> &'static str {
        match self {
            ViewAction::Start => "start",
            ViewAction::Back => "back",
            ViewAction::Submit(_) => "submit",
            ViewAction::PlanReady(_) => "plan_ready",
            ViewAction::PlanFailed => "plan_failed",
            ViewAction::Retry => "retry",
            ViewAction::Restart => "restart",
        }
    }
}

/// What each view needs in order to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    Landing,
    /// Accepts `submit` and `back`.
    Enrolling,
    Generating,
    Success {
        plan: &'a GeneratedCoursePlan,
        profile: &'a UserProfile,
    },
    /// Accepts `retry`.
    Error,
}

impl ViewState {
    pub fn view(&self) -> View {
        match self {
            ViewState::Landing => View::Landing,
            ViewState::Enrolling => View::Enrolling,
            ViewState::Generating { .. } => View::Generating,
            ViewState::Success { .. } => View::Success,
            ViewState::Error => View::Error,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            ViewState::Generating { profile } | ViewState::Success { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn plan(&self) -> Option<&GeneratedCoursePlan> {
        match self {
            ViewState::Success { plan, .. } => Some(plan),
            _ => None,
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        match self {
            ViewState::Landing => Screen::Landing,
            ViewState::Enrolling => Screen::Enrolling,
            ViewState::Generating { .. } => Screen::Generating,
            ViewState::Success { profile, plan } => Screen::Success { plan, profile },
            ViewState::Error => Screen::Error,
        }
    }

    /// Applies `action`, or leaves the state untouched and returns
    /// [`FunnelError::InvalidTransition`] when the current view does not accept it.
    pub fn apply(&mut self, action: ViewAction) -> Result<View, FunnelError> {
        let current = mem::take(self);
        let from = current.view();
        let trigger = action.trigger();

        let next = match (current, action) {
            (ViewState::Landing, ViewAction::Start) => ViewState::Enrolling,
            (ViewState::Enrolling, ViewAction::Back) => ViewState::Landing,
            (ViewState::Enrolling, ViewAction::Submit(profile)) => ViewState::Generating { profile },
            (ViewState::Generating { profile }, ViewAction::PlanReady(plan)) => {
                ViewState::Success { profile, plan }
            }
            (ViewState::Generating { .. }, ViewAction::PlanFailed) => ViewState::Error,
            (ViewState::Error, ViewAction::Retry) => ViewState::Enrolling,
            (ViewState::Success { .. }, ViewAction::Restart) => ViewState::Landing,
            (current, _) => {
                *self = current;
                return Err(FunnelError::invalid_transition(from, trigger));
            }
        };

        *self = next;
        Ok(self.view())
    }
}

pub struct EnrollmentController {
    state: ViewState,
    plans: Arc<dyn PlanSource>,
    saver: Arc<dyn SaveSink>,
    dispatch: DispatchPolicy,
    events: broadcast::Sender<View>,
}

impl EnrollmentController {
    pub fn new(plans: Arc<dyn PlanSource>, saver: Arc<dyn SaveSink>) -> Self {
        let (events, _) = broadcast::channel(VIEW_EVENT_CAPACITY);
        Self {
            state: ViewState::default(),
            plans,
            saver,
            dispatch: DispatchPolicy::default(),
            events,
        }
    }

    pub fn with_dispatch_policy(mut self, dispatch: DispatchPolicy) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view()
    }

    pub fn screen(&self) -> Screen<'_> {
        self.state.screen()
    }

    /// Every view change, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<View> {
        self.events.subscribe()
    }

    pub fn start(&mut self) -> Result<View, FunnelError> {
        self.transition(ViewAction::Start)
    }

    pub fn back(&mut self) -> Result<View, FunnelError> {
        self.transition(ViewAction::Back)
    }

    pub fn retry(&mut self) -> Result<View, FunnelError> {
        self.transition(ViewAction::Retry)
    }

    /// Returns to Landing and drops the profile and plan.
    pub fn restart(&mut self) -> Result<View, FunnelError> {
        self.transition(ViewAction::Restart)
    }

    /// Moves to Generating, dispatches the enrollment save, then makes exactly
    /// one derivation attempt and settles on Success or Error.
    ///
    /// The save outcome never influences the resulting view.
    pub async fn submit(&mut self, profile: UserProfile) -> Result<View, FunnelError> {
        self.transition(ViewAction::Submit(profile.clone()))?;
        self.dispatch_enrollment_save(profile.clone()).await;

        match self.plans.generate(&profile).await {
            Ok(plan) => {
                info!(weeks = plan.weeks.len(), cohort = %profile.cohort, "course plan ready");
                self.transition(ViewAction::PlanReady(plan))
            }
            Err(err) => {
                error!("syllabus generation failed: {err:#}");
                self.transition(ViewAction::PlanFailed)
            }
        }
    }

    async fn dispatch_enrollment_save(&self, profile: UserProfile) {
        let record = SaveRecord::Enrollment(profile);
        match self.dispatch {
            DispatchPolicy::Detached => {
                let saver = Arc::clone(&self.saver);
                tokio::spawn(async move {
                    let _ = saver.save(record, SaveKind::Enrollment).await;
                });
            }
            DispatchPolicy::Awaited => {
                let outcome = self.saver.save(record, SaveKind::Enrollment).await;
                debug!(?outcome, "enrollment save finished");
            }
        }
    }

    fn transition(&mut self, action: ViewAction) -> Result<View, FunnelError> {
        let view = self.state.apply(action)?;
        debug!(%view, "view changed");
        let _ = self.events.send(view);
        Ok(view)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
