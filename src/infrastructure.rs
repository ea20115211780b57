pub mod auth;
pub mod db;
pub mod templates;
pub mod utils;
