pub mod conversation;
pub mod engine;
pub mod errors;
pub mod events;
pub mod messages;
pub mod plan;
pub mod progress;
pub mod scheduler;
pub mod traits;
