pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod experiment;
pub mod logging;
pub mod models;
pub mod output;
pub mod server;
pub mod statistics;
pub mod task;
pub mod workload;
