pub mod activities;

pub mod attendance;

pub mod dashboard;

pub mod grades;

pub mod students;

pub mod subjects;

pub mod system;

pub mod upload;

pub mod frontend;

pub use activities::configure_activity_routes;
pub use attendance::configure_attendance_routes;
pub use dashboard::configure_dashboard_routes;
pub use frontend::configure_frontend_routes;
pub use grades::configure_grade_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use upload::configure_upload_routes;

#[cfg(test)]
mod tests;
