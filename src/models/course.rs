use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::Schedule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub level: String,
    pub description: String,
    pub image: Option<String>,
}

/// A course together with its batches. Batches are looked up from the
/// schedule collection on every read and never stored on the course.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub batches: Vec<Schedule>,
}

/// Body for both creating and editing a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewCourseRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Course name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Level is required"))]
    pub level: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    pub image: Option<String>,
}

impl NewCourseRequest {
    /// Empty image strings coming from a form mean "no image".
    pub(crate) fn image(&self) -> Option<String> {
        self.image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
