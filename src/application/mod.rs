// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the view layer and services
// - Translates domain records into DTOs
// - Owns no state beyond the AppState handed in by the entry point

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
