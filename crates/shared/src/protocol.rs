use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::SaveKind;

/// JSON document posted to the spreadsheet webhook.
///
/// The record's own fields are flattened next to the envelope fields, so an
/// enrollment row carries `name`, `email`, ... alongside `type`, `timestamp`
/// and `userAgent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload<R> {
    #[serde(flatten)]
    pub record: R,
    #[serde(rename = "type")]
    pub kind: SaveKind,
    pub timestamp: String,
    pub user_agent: String,
}

impl<R: Serialize> SubmissionPayload<R> {
    pub fn new(record: R, kind: SaveKind, at: DateTime<Utc>, user_agent: impl Into<String>) -> Self {
        Self {
            record,
            kind,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: user_agent.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::InterestRecord;

    #[test]
    fn payload_flattens_record_next_to_envelope() {
        let at = Utc.with_ymd_and_hms(2025, 1, 6, 9, 30, 0).single().expect("time");
        let payload = SubmissionPayload::new(
            InterestRecord {
                name: "Alex".into(),
                email: String::new(),
            },
            SaveKind::Interest,
            at,
            "enroll-cli/0.1.0",
        );

        let value = serde_json::to_value(&payload).expect("json");
        assert_eq!(value["name"], "Alex");
        assert_eq!(value["email"], "");
        assert_eq!(value["type"], "INTEREST");
        assert_eq!(value["timestamp"], "2025-01-06T09:30:00.000Z");
        assert_eq!(value["userAgent"], "enroll-cli/0.1.0");
        assert!(value.get("record").is_none());
    }
}
