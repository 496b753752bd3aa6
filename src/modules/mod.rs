pub mod assessments;
pub mod attendance;
pub mod classes;
pub mod notifications;
pub mod schedules;
pub mod students;
pub mod submissions;
pub mod syllabus;

pub use self::assessments::AssessmentService;
pub use self::attendance::AttendanceService;
pub use self::classes::ClassService;
pub use self::notifications::NotificationService;
pub use self::schedules::ScheduleService;
pub use self::students::StudentService;
pub use self::submissions::SubmissionService;
pub use self::syllabus::SyllabusService;
