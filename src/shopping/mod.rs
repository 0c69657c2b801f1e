use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod generator;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::shopping_routes())
}
