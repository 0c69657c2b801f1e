use crate::state::AppState;
use axum::Router;

pub mod client;
mod dto;
pub mod handlers;
pub mod prompts;
pub mod repo;
pub mod response;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::ai_routes())
}
