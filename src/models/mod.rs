// Data models

pub mod report_settings;
pub mod training_session;
pub mod user;

pub use report_settings::*;
pub use training_session::*;
pub use user::*;
