pub mod database;
pub mod diesel;
