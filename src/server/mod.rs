mod blocking;
pub mod dto;
pub mod middleware;
mod pages;
pub mod response;
mod router;
mod syncs;
mod users;
pub mod validation;

pub use blocking::run_blocking;
pub use middleware::REQUEST_ID_HEADER;
pub use router::{AppState, create_router};
