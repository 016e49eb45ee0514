// src/lib.rs

pub mod commands;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod models;
pub mod render;
pub mod repository;
pub mod scheduler;
pub mod selector;
pub mod stats;
pub mod study;

pub use error::{Result, StudyError};
