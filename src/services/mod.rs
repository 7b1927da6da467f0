// Business logic services

pub mod report_scheduler;
pub mod report_settings_service;
pub mod training_hours_service;
pub mod training_session_service;
pub mod user_service;

pub use report_scheduler::ReportScheduler;
pub use report_settings_service::ReportSettingsService;
pub use training_hours_service::TrainingHoursService;
pub use training_session_service::TrainingSessionService;
pub use user_service::UserService;
