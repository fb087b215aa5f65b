// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the view layer and services
// - Commands accept DTOs, return DTOs
// - Commands handle error conversion for the view
// - Commands NEVER contain business logic

pub mod favorite_commands;
pub mod movie_commands;
pub mod preference_commands;
pub mod session_commands;


pub use favorite_commands::*;
pub use movie_commands::*;
pub use preference_commands::*;
pub use session_commands::*;
