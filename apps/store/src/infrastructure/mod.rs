// Infrastructure layer module
// Database connection, migrations and repository adapters

pub mod database;
pub mod repositories;
