pub mod database;
pub mod entities;
pub mod errors;
pub mod repositories;
pub mod traits;
