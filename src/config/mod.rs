// Application and database configuration

pub mod app;
pub mod database;
pub mod seeding;

pub use app::{AppConfig, RecomputePolicy};
pub use database::{run_migrations, DatabaseConfig};
pub use seeding::DatabaseSeeder;
