// src/application/commands/session_commands.rs
//
// Mock Session Command Handlers

use crate::application::error_handling::ErrorResponse;
use crate::application::{dto::SessionDto, state::AppState};

pub async fn login(state: &AppState, username: &str, password: &str) -> Result<SessionDto, String> {
    if !state.auth_service.login(username, password) {
        return Err(ErrorResponse::validation("Invalid username or password").into_json());
    }
    Ok(SessionDto::from(state.auth_service.current_user()))
}

pub async fn logout(state: &AppState) -> Result<SessionDto, String> {
    state.auth_service.logout();
    Ok(SessionDto::from(None))
}

pub async fn get_session(state: &AppState) -> Result<SessionDto, String> {
    Ok(SessionDto::from(state.auth_service.current_user()))
}
