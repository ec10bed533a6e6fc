use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;
use validator::Validate;

use crate::models::InstructorId;
use crate::models::course::not_blank;

/// A single booked lecture ("batch").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub course_id: Uuid,
    /// Course name at the time the batch was booked.
    pub course_name: String,
    pub batch_name: String,
    pub instructor_id: InstructorId,
    pub instructor_name: String,
    pub date: NaiveDate,
    /// Free-form time of day, not part of the conflict key.
    pub time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewScheduleRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Course is required"))]
    pub course_id: Option<Uuid>,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Batch name is required"))]
    pub batch_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Instructor is required"))]
    pub instructor_id: Option<InstructorId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Date is required"))]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Time is required"))]
    pub time: String,
}

/// Form selects post `""` when nothing is picked.
#[derive(Deserialize)]
#[serde(untagged)]
enum FormValue<T> {
    Value(T),
    Text(String),
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<FormValue<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FormValue::Value(value)) => Ok(Some(value)),
        Some(FormValue::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(FormValue::Text(text)) => {
            Err(de::Error::custom(format!("invalid value: {:?}", text)))
        }
    }
}

/// Answer of the confirm step that guards destructive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selections_deserialize_as_missing() {
        let req: NewScheduleRequest = serde_json::from_str(
            r#"{"course_id": "", "batch_name": "A", "instructor_id": "", "date": " ", "time": "10:00"}"#,
        )
        .expect("blank selections should deserialize");
        assert_eq!(req.course_id, None);
        assert_eq!(req.instructor_id, None);
        assert_eq!(req.date, None);

        let errors = req.validate().expect_err("blank selections should fail validation");
        let fields = errors.field_errors();
        assert!(fields.contains_key("course_id"));
        assert!(fields.contains_key("instructor_id"));
        assert!(fields.contains_key("date"));
    }

    #[test]
    fn filled_selections_keep_their_values() {
        let req: NewScheduleRequest = serde_json::from_str(
            r#"{"course_id": "8d3c1f7e-3b7a-4f7e-9a53-3f1b2a9c0d11", "batch_name": "A",
                "instructor_id": 2, "date": "2024-05-01", "time": "10:00"}"#,
        )
        .unwrap();
        assert!(req.course_id.is_some());
        assert_eq!(req.instructor_id, Some(2));
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2024, 5, 1));

        let nulls: NewScheduleRequest =
            serde_json::from_str(r#"{"course_id": null, "date": null}"#).unwrap();
        assert_eq!(nulls.course_id, None);
        assert_eq!(nulls.date, None);
    }

    #[test]
    fn garbage_selection_is_rejected() {
        let res = serde_json::from_str::<NewScheduleRequest>(r#"{"date": "not-a-date"}"#);
        assert!(res.is_err());
    }
}
