//! Role-specific login routes.
//!
//! When the backend rejects a session token the client clears the session
//! and reports the login route for the session's role.
//!
//! # Environment Variables
//!
//! - `STUDENT_LOGIN_ROUTE` (default: `/student/login`)
//! - `TEACHER_LOGIN_ROUTE` (default: `/teacher/login`)
//! - `ADMIN_LOGIN_ROUTE` (default: `/admin/login`)
//! - `DEFAULT_LOGIN_ROUTE`: used when no session role is known (default: `/`)

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginRoutes {
    pub student: String,
    pub teacher: String,
    pub admin: String,
    pub fallback: String,
}

impl Default for LoginRoutes {
    fn default() -> Self {
        Self {
            student: "/student/login".into(),
            teacher: "/teacher/login".into(),
            admin: "/admin/login".into(),
            fallback: "/".into(),
        }
    }
}

impl LoginRoutes {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |key: &str, default: String| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default)
        };

        Self {
            student: pick("STUDENT_LOGIN_ROUTE", defaults.student),
            teacher: pick("TEACHER_LOGIN_ROUTE", defaults.teacher),
            admin: pick("ADMIN_LOGIN_ROUTE", defaults.admin),
            fallback: pick("DEFAULT_LOGIN_ROUTE", defaults.fallback),
        }
    }
}
