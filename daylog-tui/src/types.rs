use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::PrimitiveDateTime;

use crate::calendar::CalendarDate;

/// One calendar day's notes and completion flag, as stored by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DayRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: CalendarDate,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub completed: bool,
    /// Raw server timestamp; the server emits naive timestamps in more
    /// than one shape, so it is only parsed for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl DayRecord {
    /// The record a date has before anything was saved for it.
    pub fn empty(date: CalendarDate) -> Self {
        Self {
            id: None,
            date,
            content: String::new(),
            completed: false,
            updated_at: None,
        }
    }
}

/// Server `updated_at` as `YYYY-MM-DD HH:MM`, if it looks like a timestamp.
/// Accepts both `2024-03-15T21:04:11.123` and `2024-03-15 21:04:11`.
pub fn format_updated_at(raw: &str) -> Option<String> {
    let normalized = raw.get(..19)?.replacen('T', " ", 1);
    let parsed = PrimitiveDateTime::parse(
        &normalized,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .ok()?;
    Some(format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        parsed.year(),
        parsed.month() as u8,
        parsed.day(),
        parsed.hour(),
        parsed.minute()
    ))
}

/// Partial update sent with `PUT /api/days/{date}`. Unset fields are left
/// out of the body so the server keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl DayPatch {
    pub fn completion(completed: bool) -> Self {
        Self {
            content: None,
            completed: Some(completed),
        }
    }

    pub fn full(content: String, completed: bool) -> Self {
        Self {
            content: Some(content),
            completed: Some(completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_server_record_with_defaults() {
        let record: DayRecord = serde_json::from_value(json!({
            "id": 3,
            "date": "2024-03-15",
            "completed": true,
            "updated_at": "2024-03-15T21:04:11.123456"
        }))
        .unwrap();
        assert_eq!(record.id, Some(3));
        assert_eq!(record.date.to_string(), "2024-03-15");
        assert_eq!(record.content, "");
        assert!(record.completed);
        assert_eq!(
            record.updated_at.as_deref().and_then(format_updated_at).as_deref(),
            Some("2024-03-15 21:04")
        );
    }

    #[test]
    fn rejects_records_with_invalid_dates() {
        let result = serde_json::from_value::<DayRecord>(json!({
            "date": "2024-02-30",
            "content": "",
            "completed": false
        }));
        assert!(result.is_err());
    }

    #[test]
    fn formats_both_timestamp_shapes() {
        assert_eq!(
            format_updated_at("2024-01-02 08:30:00").as_deref(),
            Some("2024-01-02 08:30")
        );
        assert_eq!(
            format_updated_at("2024-01-02T08:30:59.5").as_deref(),
            Some("2024-01-02 08:30")
        );
        assert_eq!(format_updated_at("yesterday"), None);
    }

    #[test]
    fn patch_omits_unset_fields() {
        assert_eq!(
            serde_json::to_value(DayPatch::completion(true)).unwrap(),
            json!({ "completed": true })
        );
        assert_eq!(
            serde_json::to_value(DayPatch::full("# notes".into(), false)).unwrap(),
            json!({ "content": "# notes", "completed": false })
        );
    }
}
