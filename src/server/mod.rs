mod api;
mod assets;
pub mod dto;
pub mod pages;
pub mod response;
mod router;
pub mod validation;

pub use api::api_router;
pub use router::{AppState, create_router};
