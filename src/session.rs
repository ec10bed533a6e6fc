//! Caller identity.
//!
//! Authentication happens upstream; whatever sits in front of this service
//! forwards the caller's role (and instructor id) as request headers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::models::InstructorId;

pub const ROLE_HEADER: &str = "x-user-role";
pub const INSTRUCTOR_HEADER: &str = "x-instructor-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Admin,
    Instructor(InstructorId),
}

impl Session {
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self {
            Session::Admin => Ok(()),
            Session::Instructor(_) => Err(AppError::Forbidden(
                "this action is restricted to admins".to_string(),
            )),
        }
    }

    pub fn instructor_id(&self) -> Option<InstructorId> {
        match self {
            Session::Admin => None,
            Session::Instructor(id) => Some(*id),
        }
    }

    fn from_headers(role: Option<&str>, instructor: Option<&str>) -> Result<Self, AppError> {
        match role.map(str::trim) {
            Some("admin") => Ok(Session::Admin),
            Some("instructor") => {
                let raw = instructor.ok_or_else(|| {
                    AppError::Unauthorized(format!("{} header is missing", INSTRUCTOR_HEADER))
                })?;
                let id = raw.trim().parse::<InstructorId>().map_err(|_| {
                    AppError::Unauthorized(format!("invalid {} header: {}", INSTRUCTOR_HEADER, raw))
                })?;
                Ok(Session::Instructor(id))
            }
            Some(other) => Err(AppError::Unauthorized(format!("unknown role: {}", other))),
            None => Err(AppError::Unauthorized(format!(
                "{} header is missing",
                ROLE_HEADER
            ))),
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Session::from_headers(
            header(parts, ROLE_HEADER),
            header(parts, INSTRUCTOR_HEADER),
        )
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_session() {
        let session = Session::from_headers(Some("admin"), None).unwrap();
        assert_eq!(session, Session::Admin);
        assert!(session.require_admin().is_ok());
        assert_eq!(session.instructor_id(), None);
    }

    #[test]
    fn test_instructor_session_uses_its_own_id() {
        let session = Session::from_headers(Some("instructor"), Some("2")).unwrap();
        assert_eq!(session.instructor_id(), Some(2));
        assert!(matches!(
            session.require_admin(),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_rejects_missing_or_bad_headers() {
        for (role, id) in [
            (None, None),
            (Some("student"), None),
            (Some("instructor"), None),
            (Some("instructor"), Some("abc")),
        ] {
            assert!(
                matches!(Session::from_headers(role, id), Err(AppError::Unauthorized(_))),
                "{:?}/{:?} should be rejected",
                role,
                id
            );
        }
    }
}
