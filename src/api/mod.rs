use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{delete, get};
use axum::{Router, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::*;
use crate::session::Session;
use crate::state::AppState;
use crate::store::CourseDeletion;

#[derive(Deserialize)]
struct ConfirmParams {
    #[serde(default)]
    confirm: bool,
}

#[derive(Deserialize)]
struct ConflictParams {
    instructor_id: InstructorId,
    date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConflictCheck {
    pub instructor_id: InstructorId,
    pub date: NaiveDate,
    pub conflict: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/instructors", get(list_instructors))
        .route("/instructors/{id}/schedules", get(instructor_schedules))
        .route("/me/schedules", get(my_schedules))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/schedules", get(list_schedules).post(assign_schedule))
        .route("/schedules/{id}", delete(delete_schedule))
        .route("/conflicts", get(check_conflict))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_instructors(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<InstructorSummary>>, AppError> {
    session.require_admin()?;
    let store = state.store.read().await;
    Ok(Json(store.instructor_summaries()))
}

async fn instructor_schedules(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<InstructorId>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    session.require_admin()?;
    let store = state.store.read().await;
    if store.instructor(id).is_none() {
        return Err(AppError::NotFound(format!("instructor {}", id)));
    }
    Ok(Json(store.schedules_for_instructor(id)))
}

/// Lectures of the signed-in instructor.
async fn my_schedules(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Schedule>>, AppError> {
    let id = session.instructor_id().ok_or_else(|| {
        AppError::Forbidden("only instructors have their own schedule".to_string())
    })?;
    let store = state.store.read().await;
    Ok(Json(store.schedules_for_instructor(id)))
}

async fn list_courses(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<CourseDetail>>, AppError> {
    session.require_admin()?;
    let store = state.store.read().await;
    Ok(Json(store.course_details()))
}

async fn get_course(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetail>, AppError> {
    session.require_admin()?;
    let store = state.store.read().await;
    store
        .course_detail(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("course {}", id)))
}

async fn create_course(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NewCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    session.require_admin()?;
    let course = state.store.write().await.create_course(req)?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn update_course(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<NewCourseRequest>,
) -> Result<Json<Course>, AppError> {
    session.require_admin()?;
    let course = state.store.write().await.update_course(id, req)?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<CourseDeletion>, AppError> {
    session.require_admin()?;
    let deletion = state
        .store
        .write()
        .await
        .delete_course(id, params.confirm.into())?;
    Ok(Json(deletion))
}

async fn list_schedules(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Schedule>>, AppError> {
    session.require_admin()?;
    let store = state.store.read().await;
    Ok(Json(store.schedules_by_date()))
}

async fn assign_schedule(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NewScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    session.require_admin()?;
    let schedule = state.store.write().await.assign_schedule(req)?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

async fn delete_schedule(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<Schedule>, AppError> {
    session.require_admin()?;
    let schedule = state
        .store
        .write()
        .await
        .delete_schedule(id, params.confirm.into())?;
    Ok(Json(schedule))
}

/// Lets the booking form warn before submitting.
async fn check_conflict(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ConflictParams>,
) -> Result<Json<ConflictCheck>, AppError> {
    session.require_admin()?;
    let store = state.store.read().await;
    Ok(Json(ConflictCheck {
        instructor_id: params.instructor_id,
        date: params.date,
        conflict: store.conflict_exists(params.instructor_id, params.date),
    }))
}
