pub mod facets;
pub mod favorites;
pub mod handlers;
pub mod journeys;
pub mod recommend;
pub mod resolve;
pub mod routes;

pub use routes::create_router;
