use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;
use crate::models::{
    Confirmation, Course, CourseDetail, Instructor, InstructorId, InstructorSummary,
    NewCourseRequest, NewScheduleRequest, Schedule,
};

/// In-memory store for instructors, courses and lecture schedules.
///
/// Schedules are kept in a single collection. The per-course batch list is
/// always derived from it, so removing a schedule can never leave a stale
/// copy behind on its course. No two schedules share an instructor and a
/// date.
#[derive(Debug, Default)]
pub struct SchedulingStore {
    instructors: Vec<Instructor>,
    courses: Vec<Course>,
    schedules: Vec<Schedule>,
}

/// Outcome of a confirmed course deletion. Deleting an unknown course is a
/// no-op and reports `course: None`.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDeletion {
    pub course: Option<Course>,
    pub schedules_removed: usize,
}

impl SchedulingStore {
    pub fn new(instructors: Vec<Instructor>) -> Self {
        info!("Seeding store with {} instructors", instructors.len());
        Self {
            instructors,
            courses: Vec::new(),
            schedules: Vec::new(),
        }
    }

    // --- instructors ---

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn instructor(&self, id: InstructorId) -> Option<&Instructor> {
        self.instructors.iter().find(|i| i.id == id)
    }

    pub fn instructor_summaries(&self) -> Vec<InstructorSummary> {
        debug!("Summarising {} instructors", self.instructors.len());
        self.instructors
            .iter()
            .map(|instructor| InstructorSummary {
                instructor: instructor.clone(),
                lecture_count: self
                    .schedules
                    .iter()
                    .filter(|s| s.instructor_id == instructor.id)
                    .count(),
            })
            .collect()
    }

    // --- courses ---

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: Uuid) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_detail(&self, id: Uuid) -> Option<CourseDetail> {
        self.course(id).map(|course| CourseDetail {
            course: course.clone(),
            batches: self.course_schedules(id),
        })
    }

    pub fn course_details(&self) -> Vec<CourseDetail> {
        debug!("Listing {} courses", self.courses.len());
        self.courses
            .iter()
            .map(|course| CourseDetail {
                course: course.clone(),
                batches: self.course_schedules(course.id),
            })
            .collect()
    }

    pub fn create_course(&mut self, req: NewCourseRequest) -> Result<Course, AppError> {
        req.validate()?;

        let course = Course {
            id: Uuid::new_v4(),
            image: req.image(),
            name: req.name,
            level: req.level,
            description: req.description,
        };
        self.courses.push(course.clone());

        info!("Created course {} ({})", course.name, course.id);
        Ok(course)
    }

    /// Replaces name, level, description and image. The id and the course's
    /// batches are left alone; booked batches keep the course name they were
    /// booked under.
    pub fn update_course(&mut self, id: Uuid, req: NewCourseRequest) -> Result<Course, AppError> {
        req.validate()?;

        let course = self
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("course {}", id)))?;

        course.image = req.image();
        course.name = req.name;
        course.level = req.level;
        course.description = req.description;

        info!("Updated course {} ({})", course.name, course.id);
        Ok(course.clone())
    }

    /// Removes the course and every schedule booked against it.
    pub fn delete_course(
        &mut self,
        id: Uuid,
        confirmation: Confirmation,
    ) -> Result<CourseDeletion, AppError> {
        if !confirmation.is_confirmed() {
            return Err(AppError::ConfirmationRequired(format!(
                "deleting course {} must be confirmed",
                id
            )));
        }

        let Some(pos) = self.courses.iter().position(|c| c.id == id) else {
            debug!("Delete of unknown course {} ignored", id);
            return Ok(CourseDeletion {
                course: None,
                schedules_removed: 0,
            });
        };
        let course = self.courses.remove(pos);

        let before = self.schedules.len();
        self.schedules.retain(|s| s.course_id != id);
        let schedules_removed = before - self.schedules.len();

        info!(
            "Deleted course {} ({}) and {} schedule(s)",
            course.name, course.id, schedules_removed
        );
        Ok(CourseDeletion {
            course: Some(course),
            schedules_removed,
        })
    }

    // --- schedules ---

    /// True iff the instructor already has a lecture on `date`. Time of day
    /// is ignored.
    pub fn conflict_exists(&self, instructor_id: InstructorId, date: NaiveDate) -> bool {
        self.schedules
            .iter()
            .any(|s| s.instructor_id == instructor_id && s.date == date)
    }

    pub fn schedule(&self, id: Uuid) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    /// Batches of one course, in booking order.
    pub fn course_schedules(&self, course_id: Uuid) -> Vec<Schedule> {
        self.schedules
            .iter()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect()
    }

    /// Every schedule, earliest date first.
    pub fn schedules_by_date(&self) -> Vec<Schedule> {
        let mut schedules = self.schedules.clone();
        sort_by_date(&mut schedules);
        debug!("Listing {} schedules", schedules.len());
        schedules
    }

    pub fn schedules_for_instructor(&self, instructor_id: InstructorId) -> Vec<Schedule> {
        let mut schedules: Vec<Schedule> = self
            .schedules
            .iter()
            .filter(|s| s.instructor_id == instructor_id)
            .cloned()
            .collect();
        sort_by_date(&mut schedules);
        debug!(
            "Found {} schedule(s) for instructor {}",
            schedules.len(),
            instructor_id
        );
        schedules
    }

    /// Books a lecture. Checks run in order: required fields, instructor
    /// conflict on the date, then course and instructor lookup. A failed
    /// check leaves the store untouched.
    pub fn assign_schedule(&mut self, req: NewScheduleRequest) -> Result<Schedule, AppError> {
        req.validate()?;
        let (Some(course_id), Some(instructor_id), Some(date)) =
            (req.course_id, req.instructor_id, req.date)
        else {
            // already rejected by validate()
            return Err(AppError::Validation(ValidationErrors::new()));
        };

        if self.conflict_exists(instructor_id, date) {
            warn!(
                "Rejected booking {}: instructor {} already booked on {}",
                req.batch_name, instructor_id, date
            );
            return Err(AppError::Conflict {
                instructor_id,
                date,
            });
        }

        let course = self
            .course(course_id)
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_id)))?;
        let instructor = self
            .instructor(instructor_id)
            .ok_or_else(|| AppError::NotFound(format!("instructor {}", instructor_id)))?;

        let schedule = Schedule {
            id: Uuid::new_v4(),
            course_id,
            course_name: course.name.clone(),
            batch_name: req.batch_name,
            instructor_id,
            instructor_name: instructor.name.clone(),
            date,
            time: req.time,
        };
        self.schedules.push(schedule.clone());

        info!(
            "Assigned {} / {} to {} on {} at {}",
            schedule.course_name,
            schedule.batch_name,
            schedule.instructor_name,
            schedule.date,
            schedule.time
        );
        Ok(schedule)
    }

    pub fn delete_schedule(
        &mut self,
        id: Uuid,
        confirmation: Confirmation,
    ) -> Result<Schedule, AppError> {
        if !confirmation.is_confirmed() {
            return Err(AppError::ConfirmationRequired(format!(
                "deleting schedule {} must be confirmed",
                id
            )));
        }

        let pos = self
            .schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("schedule {}", id)))?;
        let schedule = self.schedules.remove(pos);

        info!(
            "Deleted schedule {} ({} on {})",
            schedule.id, schedule.instructor_name, schedule.date
        );
        Ok(schedule)
    }
}

fn sort_by_date(schedules: &mut [Schedule]) {
    schedules.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
}
