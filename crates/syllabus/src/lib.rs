//! Syllabus derivation: turns an enrollment profile into a personalised
//! four-week course plan by filling the fixed template with the cohort's
//! meeting days and time window.
//!
//! Everything here is pure. The same profile always yields the same plan.

use chrono::Weekday;
use serde::Serialize;
use shared::domain::{CohortOption, GeneratedCoursePlan, SyllabusWeek, UserProfile};
use thiserror::Error;

pub mod template;

pub use template::Placeholder;
use template::{find_unresolved, BASE_SYLLABUS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyllabusError {
    #[error("week {week} topic `{topic}` still contains `{token}` after substitution")]
    UnresolvedPlaceholder {
        week: u8,
        topic: String,
        token: String,
    },
}

/// Meeting days and time window of a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CohortSchedule {
    pub days: (Weekday, Weekday),
    pub time_window: &'static str,
}

impl CohortSchedule {
    pub fn for_cohort(cohort: CohortOption) -> Self {
        match cohort {
            CohortOption::WeekendMorning => Self {
                days: (Weekday::Sat, Weekday::Sun),
                time_window: "Mornings (10am - 12pm)",
            },
            CohortOption::WeekdayEvening => Self {
                days: (Weekday::Tue, Weekday::Thu),
                time_window: "Evenings (7pm - 9pm)",
            },
        }
    }

    pub fn day_names(&self) -> (&'static str, &'static str) {
        (day_name(self.days.0), day_name(self.days.1))
    }
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Value for every [`Placeholder`] the template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionTable {
    day1: &'static str,
    day2: &'static str,
}

impl SubstitutionTable {
    pub fn for_schedule(schedule: &CohortSchedule) -> Self {
        let (day1, day2) = schedule.day_names();
        Self { day1, day2 }
    }

    pub fn value(&self, placeholder: Placeholder) -> &'static str {
        match placeholder {
            Placeholder::Day1 => self.day1,
            Placeholder::Day2 => self.day2,
        }
    }

    /// Replaces the first occurrence of each placeholder token.
    pub fn apply(&self, template: &str) -> String {
        Placeholder::ALL
            .iter()
            .fold(template.to_string(), |text, placeholder| {
                text.replacen(placeholder.token(), self.value(*placeholder), 1)
            })
    }

    fn render_topic(&self, week: u8, template: &str) -> Result<String, SyllabusError> {
        let topic = self.apply(template);
        if let Some(token) = find_unresolved(&topic) {
            return Err(SyllabusError::UnresolvedPlaceholder {
                week,
                topic: template.to_string(),
                token: token.to_string(),
            });
        }
        Ok(topic)
    }
}

/// Headline data for one template week, shown before enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekPreview {
    pub week: u8,
    pub title: &'static str,
    pub description: &'static str,
}

pub fn course_preview() -> Vec<WeekPreview> {
    BASE_SYLLABUS
        .iter()
        .map(|week| WeekPreview {
            week: week.week_number,
            title: week.title,
            description: week.description,
        })
        .collect()
}

/// Everything before the first space. Names without a space are returned whole.
pub fn first_name(name: &str) -> &str {
    name.split(' ').next().unwrap_or_default()
}

pub fn welcome_message(first_name: &str, cohort: CohortOption, schedule: &CohortSchedule) -> String {
    let (day1, day2) = schedule.day_names();
    format!(
        "Welcome, {first_name}! You've secured your spot in the {cohort} cohort. \
         Get ready for 4 weeks of intensive learning, every {day1} and {day2} {}.",
        schedule.time_window
    )
}

pub fn derive(profile: &UserProfile) -> Result<GeneratedCoursePlan, SyllabusError> {
    let schedule = CohortSchedule::for_cohort(profile.cohort);
    let table = SubstitutionTable::for_schedule(&schedule);

    let weeks = BASE_SYLLABUS
        .iter()
        .map(|week| -> Result<SyllabusWeek, SyllabusError> {
            let topics = week
                .topics
                .iter()
                .map(|topic| table.render_topic(week.week_number, topic))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SyllabusWeek {
                week_number: week.week_number,
                title: week.title.to_string(),
                description: week.description.to_string(),
                topics,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeneratedCoursePlan {
        welcome_message: welcome_message(first_name(&profile.name), profile.cohort, &schedule),
        weeks,
    })
}

/// Checks that every cohort's table resolves every token in the template.
pub fn validate_template() -> Result<(), SyllabusError> {
    for cohort in CohortOption::ALL {
        let table = SubstitutionTable::for_schedule(&CohortSchedule::for_cohort(*cohort));
        for week in &BASE_SYLLABUS {
            for topic in week.topics {
                table.render_topic(week.week_number, topic)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
