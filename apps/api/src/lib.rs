pub mod codec;
pub mod config;
pub mod draft;
pub mod editor;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
