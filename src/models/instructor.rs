use serde::{Deserialize, Serialize};

pub type InstructorId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub name: String,
    pub email: String,
}

impl Instructor {
    pub fn new(id: InstructorId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Instructor row for the admin overview, with the number of lectures
/// currently booked for them.
#[derive(Debug, Clone, Serialize)]
pub struct InstructorSummary {
    #[serde(flatten)]
    pub instructor: Instructor,
    pub lecture_count: usize,
}

/// Seed used when no instructor file is configured.
pub fn default_instructors() -> Vec<Instructor> {
    vec![
        Instructor::new(1, "Dr. Sarah Johnson", "sarah.j@ideamagix.com"),
        Instructor::new(2, "Prof. Michael Chen", "michael.c@ideamagix.com"),
        Instructor::new(3, "Dr. Emily Davis", "emily.d@ideamagix.com"),
    ]
}
