pub mod course;
pub mod instructor;
pub mod schedule;

pub use course::{Course, CourseDetail, NewCourseRequest};
pub use instructor::{Instructor, InstructorId, InstructorSummary};
pub use schedule::{Confirmation, NewScheduleRequest, Schedule};
