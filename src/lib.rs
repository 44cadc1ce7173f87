//! Edupath - study abroad agency website
//!
//! This library provides the core functionality for the Edupath site:
//! blog, partner directory, contact form and language center applications.

pub mod api;
pub mod config;
pub mod db;
pub mod forms;
pub mod models;
pub mod services;
pub mod theme;
