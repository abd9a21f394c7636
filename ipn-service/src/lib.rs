pub mod config;
pub mod models;
pub mod schema;
pub mod utils;
pub mod validator;
