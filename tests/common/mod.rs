#![allow(dead_code)]

use chalkportal::state::PortalState;
use chalkportal_auth::{Role, Session, SessionContext};
use chalkportal_cache::testing::ScriptedBackend;
use chalkportal_cache::{HttpBackend, LocalBackend};
use chalkportal_config::{ApiConfig, LoginRoutes, StorageConfig};
use fake::Fake;
use fake::faker::name::en::Name;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use std::path::Path;
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub const TEACHER_ID: &str = "u-teacher-1";

/// A signed token as the backend would issue it. The client never sees the secret.
pub fn issue_token(role: &str, user_id: &str) -> String {
    encode(
        &Header::default(),
        &json!({
            "sub": user_id,
            "email": format!("{user_id}@school.test"),
            "role": role,
            "role_ids": [format!("role-{role}")],
            "exp": 4_102_444_800u64
        }),
        &EncodingKey::from_secret(b"backend-only-secret"),
    )
    .unwrap()
}

pub fn teacher_session() -> SessionContext {
    let session = Session::from_token(issue_token("teacher", TEACHER_ID)).unwrap();
    assert_eq!(session.role, Some(Role::Teacher));
    SessionContext::with_session(session)
}

pub fn student_session() -> SessionContext {
    SessionContext::with_session(Session::from_token(issue_token("student", "u-student-1")).unwrap())
}

pub fn http_state(server: &MockServer, session: SessionContext) -> PortalState<HttpBackend> {
    PortalState::http(ApiConfig::new(server.uri()), LoginRoutes::default(), session).unwrap()
}

pub fn local_state(dir: &Path) -> PortalState<LocalBackend> {
    let config = StorageConfig::new(dir)
        .with_parent_field("students", "classId")
        .with_parent_field("attendance", "classId")
        .with_parent_field("syllabus", "classId")
        .with_parent_field("submissions", "testId");
    PortalState::local(config, teacher_session())
}

pub fn scripted_state() -> PortalState<ScriptedBackend> {
    PortalState::new(ScriptedBackend::new(), teacher_session())
}

/// Registers an expiry hook and returns the login routes it was called with.
pub fn record_expiries<B: chalkportal_cache::ResourceBackend>(
    state: &PortalState<B>,
) -> Arc<Mutex<Vec<String>>> {
    let routes = Arc::new(Mutex::new(Vec::new()));
    state.store.on_auth_expired({
        let routes = Arc::clone(&routes);
        move |route| routes.lock().unwrap().push(route.to_string())
    });
    routes
}

pub fn fake_student_name() -> String {
    Name().fake()
}

pub fn generate_unique_class_name() -> String {
    format!("Class {}", &uuid_suffix())
}

fn uuid_suffix() -> String {
    let n: u32 = (0..u32::MAX).fake();
    format!("{n:08x}")
}
