//src/lib.rs

pub mod common;
pub mod config;
pub mod device;
pub mod middleware;
pub mod models;
pub mod screens;
pub mod services;
pub mod storage;

pub use common::error::AppError;
pub use config::{AppConfig, AppState};
