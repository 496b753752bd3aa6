mod common;

use chalkportal::modules::{
    AssessmentService, AttendanceService, ClassService, NotificationService, ScheduleService,
    StudentService, SubmissionService, SyllabusService,
};
use chalkportal_core::StoreError;
use chalkportal_models::{
    Audience, CreateAssessmentDto, CreateNotificationDto, CreateScheduleDto, CreateStudentDto,
    AttendanceStatus, CreateSubmissionDto, CreateSyllabusDto, GradeSubmissionDto, Question,
    SaveAttendanceDto, UpdateAttendanceDto,
};
use chrono::NaiveDate;
use common::{fake_student_name, generate_unique_class_name, scripted_state};
use serde_json::json;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn assert_rejected_locally<T: std::fmt::Debug>(
    state: &chalkportal::state::PortalState<chalkportal_cache::testing::ScriptedBackend>,
    result: Result<T, StoreError>,
) {
    let err = result.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)), "got {err:?}");
    // Nothing was sent and the shared state never moved
    assert!(state.store.backend().calls().is_empty());
    assert_eq!(state.store.state().revision, 0);
    assert!(state.store.state().error.is_none());
}

#[tokio::test]
async fn test_invalid_class_is_rejected_before_request() {
    let state = scripted_state();
    let result = ClassService::create_class(
        &state.store,
        chalkportal_models::CreateClassDto {
            class_name: String::new(),
            description: None,
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_overlong_attendance_remarks_are_rejected() {
    let state = scripted_state();
    let result = AttendanceService::update_attendance_record(
        &state.store,
        "a1",
        UpdateAttendanceDto {
            status: AttendanceStatus::Excused,
            remarks: Some("x".repeat(201)),
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_attendance_correction_sends_remarks() {
    let state = scripted_state();
    state.store.backend().respond(
        "update:attendance:a1",
        Ok(json!({
            "_id": "a1", "classId": "c1", "studentId": "s1", "date": "2024-03-05",
            "status": "excused", "remarks": "Doctor's note"
        })),
    );

    let record = AttendanceService::update_attendance_record(
        &state.store,
        "a1",
        UpdateAttendanceDto {
            status: AttendanceStatus::Excused,
            remarks: Some("Doctor's note".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(record.remarks.as_deref(), Some("Doctor's note"));
    assert_eq!(
        state.store.backend().calls(),
        vec![(
            "update:attendance:a1".to_string(),
            json!({"status": "excused", "remarks": "Doctor's note"})
        )]
    );
}

#[tokio::test]
async fn test_invalid_student_email_is_rejected() {
    let state = scripted_state();
    let result = StudentService::create_student(
        &state.store,
        CreateStudentDto {
            roll_no: "12".into(),
            name: fake_student_name(),
            email: "nope".into(),
            class_id: "c1".into(),
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_scoped_reads_require_parent_id() {
    let state = scripted_state();
    assert_rejected_locally(&state, StudentService::fetch_students(&state.store, "").await);
    assert_rejected_locally(&state, ScheduleService::fetch_schedules(&state.store, " ").await);
    assert_rejected_locally(&state, SyllabusService::fetch_syllabi(&state.store, "").await);
    assert_rejected_locally(&state, SubmissionService::fetch_submissions(&state.store, "").await);
}

#[tokio::test]
async fn test_attendance_range_must_be_ordered() {
    let state = scripted_state();
    let result = AttendanceService::fetch_attendance(&state.store, "c1", day(9), day(2)).await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_empty_attendance_save_is_rejected() {
    let state = scripted_state();
    let result = AttendanceService::save_attendance(
        &state.store,
        SaveAttendanceDto {
            class_id: "c1".into(),
            date: day(4),
            records: vec![],
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_schedule_times_must_be_ordered() {
    let state = scripted_state();
    let result = ScheduleService::create_schedule(
        &state.store,
        CreateScheduleDto {
            class_id: "c1".into(),
            subject: "Math".into(),
            day: "Monday".into(),
            start_time: "10:00".into(),
            end_time: "09:00".into(),
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_question_answer_must_be_an_option() {
    let state = scripted_state();
    let result = AssessmentService::create_test(
        &state.store,
        CreateAssessmentDto {
            title: "Quiz".into(),
            class_id: None,
            subject: None,
            due_date: None,
            max_score: None,
            questions: vec![Question {
                prompt: "2 + 2?".into(),
                options: vec!["3".into(), "5".into()],
                answer: Some("4".into()),
                marks: None,
            }],
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_question_marks_cannot_exceed_max_score() {
    let state = scripted_state();
    let question = Question {
        prompt: "Explain photosynthesis".into(),
        options: vec![],
        answer: None,
        marks: Some(8.0),
    };
    let result = AssessmentService::create_test(
        &state.store,
        CreateAssessmentDto {
            title: "Biology".into(),
            class_id: None,
            subject: None,
            due_date: None,
            max_score: Some(10.0),
            questions: vec![question.clone(), question],
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_syllabus_file_url_must_be_a_url() {
    let state = scripted_state();
    let result = SyllabusService::create_syllabus(
        &state.store,
        CreateSyllabusDto {
            class_id: "c1".into(),
            subject: "Math".into(),
            title: "Term 1".into(),
            description: None,
            file_url: Some("not a url".into()),
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_negative_grade_is_rejected() {
    let state = scripted_state();
    let result = SubmissionService::grade_submission(
        &state.store,
        "sub-1",
        GradeSubmissionDto {
            score: -1.0,
            feedback: None,
        },
    )
    .await;
    assert_rejected_locally(&state, result);
}

#[tokio::test]
async fn test_valid_notification_reaches_backend() {
    let state = scripted_state();
    state.store.backend().respond(
        "create:notifications",
        Ok(json!({"_id": "n1", "title": "Exam", "message": "Friday", "audience": "students"})),
    );

    let created = NotificationService::create_notification(
        &state.store,
        CreateNotificationDto {
            title: "Exam".into(),
            message: "Friday".into(),
            audience: Audience::Students,
        },
    )
    .await
    .unwrap();

    assert_eq!(created.id.as_deref(), Some("n1"));
    let calls = state.store.backend().calls();
    assert_eq!(calls[0].0, "create:notifications");
    assert_eq!(calls[0].1["audience"], json!("students"));
}

#[tokio::test]
async fn test_submission_flow() {
    let state = scripted_state();
    state.store.backend().respond(
        "fetch:submissions:t1",
        Ok(json!([{"_id": "sub-1", "testId": "t1", "studentId": "s1", "answers": ["4"]}])),
    );
    state.store.backend().respond(
        "update:submissions:sub-1",
        Ok(json!({"_id": "sub-1", "testId": "t1", "studentId": "s1", "answers": ["4"], "score": 9.5})),
    );

    let submissions = SubmissionService::fetch_submissions(&state.store, "t1")
        .await
        .unwrap();
    assert!(!submissions[0].is_graded());

    let graded = SubmissionService::grade_submission(
        &state.store,
        "sub-1",
        GradeSubmissionDto {
            score: 9.5,
            feedback: Some("Well done".into()),
        },
    )
    .await
    .unwrap();
    assert!(graded.is_graded());

    // Patched in place in the cached collection
    let cached = state
        .store
        .collection::<chalkportal_models::Submission>(&"submissions".into());
    assert_eq!(cached.len(), 1);
    assert!(cached[0].is_graded());
}

#[tokio::test]
async fn test_create_submission_sends_answers() {
    let state = scripted_state();
    state.store.backend().respond(
        "create:submissions",
        Ok(json!({"_id": "sub-2", "testId": "t1", "studentId": "s1", "answers": ["4", "B"]})),
    );

    SubmissionService::create_submission(
        &state.store,
        CreateSubmissionDto {
            test_id: "t1".into(),
            student_id: "s1".into(),
            answers: vec!["4".into(), "B".into()],
        },
    )
    .await
    .unwrap();

    let calls = state.store.backend().calls();
    assert_eq!(calls[0].1["answers"], json!(["4", "B"]));
}

#[tokio::test]
async fn test_unique_class_names_are_accepted() {
    let state = scripted_state();
    let name = generate_unique_class_name();
    state.store.backend().respond(
        "create:classes",
        Ok(json!({"_id": "c9", "className": name.clone()})),
    );

    let created = ClassService::create_class(
        &state.store,
        chalkportal_models::CreateClassDto {
            class_name: name.clone(),
            description: Some("Elective".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.class_name, name);
}
