//! Enrollment funnel core: the view state machine, the waitlist modal, and
//! the spreadsheet webhook they report submissions to.

pub mod config;
pub mod controller;
pub mod draft;
pub mod interest;
pub mod plan;
pub mod save;

pub use config::{load_settings, ConfirmationPolicy, DispatchPolicy, Settings};
pub use controller::{EnrollmentController, Screen, ViewAction, ViewState};
pub use draft::EnrollmentDraft;
pub use interest::InterestCapture;
pub use plan::{PlanSource, TemplatePlanSource};
pub use save::{SaveOutcome, SaveRecord, SaveSink, SheetClient};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
