pub mod config;
pub mod models;
pub mod service;
pub mod workflow;

pub use config::{GeneratorBackend, Settings};
pub use service::{AppState, build_router, create_app};
pub use workflow::build_assistant;
