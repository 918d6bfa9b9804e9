//! Persistence layer for customers, items and the reviews that link them.

pub mod config;
pub mod db;
pub mod export;
pub mod telemetry;
