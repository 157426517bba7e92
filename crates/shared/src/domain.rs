use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FunnelError;

/// Closed set of form options that travel as their display label.
///
/// Each variant also has a short key so terminal input does not need the
/// full label. Parsing accepts either form; serialization always emits the label.
macro_rules! labelled_enum {
    ($name:ident { $($variant:ident => $label:literal, $key:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            fn from_label_or_key(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label() == raw || option.key().eq_ignore_ascii_case(raw))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl TryFrom<String> for $name {
            type Error = FunnelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_string()
            }
        }
    };
}

labelled_enum!(ExperienceLevel {
    Beginner => "Beginner", "beginner",
    Intermediate => "Intermediate", "intermediate",
    Advanced => "Advanced", "advanced",
    Expert => "Expert", "expert",
});

labelled_enum!(CohortOption {
    WeekendMorning => "Weekend (Sat/Sun 10am - 12pm)", "weekend",
    WeekdayEvening => "Weekday (Tue/Thu 7pm - 9pm)", "weekday",
});

labelled_enum!(PaymentMethod {
    Upi => "UPI / GPay", "upi",
    Card => "Card", "card",
    NetBanking => "Net Banking", "net-banking",
});

impl FromStr for ExperienceLevel {
    type Err = FunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label_or_key(s).ok_or_else(|| FunnelError::InvalidOption {
            field: "experience",
            value: s.to_string(),
        })
    }
}

impl FromStr for CohortOption {
    type Err = FunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label_or_key(s).ok_or_else(|| FunnelError::InvalidCohort(s.to_string()))
    }
}

impl FromStr for PaymentMethod {
    type Err = FunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label_or_key(s).ok_or_else(|| FunnelError::InvalidOption {
            field: "paymentMethod",
            value: s.to_string(),
        })
    }
}

impl CohortOption {
    /// The schedule part of the label, e.g. `Sat/Sun 10am - 12pm`.
    pub fn schedule_summary(self) -> &'static str {
        let label = self.label();
        label
            .split_once(" (")
            .map(|(_, rest)| rest.trim_end_matches(')'))
            .unwrap_or(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: ExperienceLevel,
    pub cohort: CohortOption,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusWeek {
    pub week_number: u8,
    pub title: String,
    pub description: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCoursePlan {
    pub welcome_message: String,
    pub weeks: Vec<SyllabusWeek>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    Landing,
    Enrolling,
    Generating,
    Success,
    Error,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Landing => "LANDING",
            View::Enrolling => "ENROLLING",
            View::Generating => "GENERATING",
            View::Success => "SUCCESS",
            View::Error => "ERROR",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaveKind {
    Interest,
    Enrollment,
}

impl fmt::Display for SaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveKind::Interest => f.write_str("INTEREST"),
            SaveKind::Enrollment => f.write_str("ENROLLMENT"),
        }
    }
}

/// Waitlist lead. Email is optional on the form and travels as an empty string when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRecord {
    pub name: String,
    pub email: String,
}

/// Lifecycle of the waitlist modal's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestPhase {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

impl fmt::Display for InterestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterestPhase::Idle => "IDLE",
            InterestPhase::Submitting => "SUBMITTING",
            InterestPhase::Submitted => "SUBMITTED",
        };
        f.write_str(name)
    }
}
