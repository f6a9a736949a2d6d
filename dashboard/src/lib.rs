pub mod api_client;
pub mod app;
pub mod config;
pub mod fetcher;
pub mod history;
pub mod render;
pub mod store;
