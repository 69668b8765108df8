pub mod args;
pub mod config;
pub mod course;
pub mod download;
pub mod messages;
pub mod progress;
pub mod purchase;
pub mod report;
pub mod resolver;
pub mod server;
