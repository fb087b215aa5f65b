// src/application/commands/preference_commands.rs
//
// Theme Command Handlers

use crate::application::{dto::ThemeDto, state::AppState};

pub async fn get_theme(state: &AppState) -> Result<ThemeDto, String> {
    Ok(ThemeDto::from(state.theme_service.current()))
}

pub async fn toggle_theme(state: &AppState) -> Result<ThemeDto, String> {
    Ok(ThemeDto::from(state.theme_service.toggle()))
}
