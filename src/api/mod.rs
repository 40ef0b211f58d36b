pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
