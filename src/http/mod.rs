// src/http/mod.rs
//
// HTTP layer: controllers mapping requests onto repository calls
//
// Provides:
// - Server configuration
// - Router assembly and serve loop
// - Request command validation
// - /authors and /books controllers

pub mod author_routes;
pub mod book_routes;
pub mod commands;
pub mod config;
pub mod response;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use server::HttpServer;
pub use state::CatalogState;
