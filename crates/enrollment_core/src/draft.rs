use shared::{
    domain::{CohortOption, ExperienceLevel, PaymentMethod, UserProfile},
    error::FunnelError,
};

/// Enrollment form contents before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: ExperienceLevel,
    pub cohort: CohortOption,
    pub payment_method: PaymentMethod,
}

impl Default for EnrollmentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            experience: ExperienceLevel::Beginner,
            cohort: CohortOption::WeekendMorning,
            payment_method: PaymentMethod::Upi,
        }
    }
}

impl EnrollmentDraft {
    /// Name, email and phone are required. Values are kept as typed.
    pub fn into_profile(self) -> Result<UserProfile, FunnelError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(FunnelError::MissingField(field));
            }
        }

        Ok(UserProfile {
            name: self.name,
            email: self.email,
            phone: self.phone,
            experience: self.experience,
            cohort: self.cohort,
            payment_method: self.payment_method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form_preselection() {
        let draft = EnrollmentDraft::default();
        assert_eq!(draft.experience, ExperienceLevel::Beginner);
        assert_eq!(draft.cohort, CohortOption::WeekendMorning);
        assert_eq!(draft.payment_method, PaymentMethod::Upi);
    }

    #[test]
    fn required_fields_are_enforced_in_form_order() {
        let err = EnrollmentDraft::default().into_profile().expect_err("empty");
        assert_eq!(err, FunnelError::MissingField("name"));

        let draft = EnrollmentDraft {
            name: "Alex Chen".into(),
            email: "alex@example.com".into(),
            phone: "   ".into(),
            ..EnrollmentDraft::default()
        };
        assert_eq!(
            draft.into_profile().expect_err("blank phone"),
            FunnelError::MissingField("phone")
        );
    }

    #[test]
    fn complete_draft_becomes_profile() {
        let profile = EnrollmentDraft {
            name: "Alex Chen".into(),
            email: "alex@example.com".into(),
            phone: "+91 98765 43210".into(),
            cohort: CohortOption::WeekdayEvening,
            ..EnrollmentDraft::default()
        }
        .into_profile()
        .expect("profile");

        assert_eq!(profile.name, "Alex Chen");
        assert_eq!(profile.cohort, CohortOption::WeekdayEvening);
        assert_eq!(profile.payment_method, PaymentMethod::Upi);
    }
}
