pub mod config;
mod http_layers;
mod jobs_routes;
mod responses;
pub mod server;
pub mod state;
mod users_routes;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::run_server;
