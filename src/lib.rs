pub mod category;
pub mod commands;
pub mod config;
pub mod context;
pub mod dataset;
pub mod errors;
pub mod exporter;
pub mod http_client;
pub mod models;
pub mod provider;
