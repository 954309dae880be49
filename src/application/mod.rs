/// Session management: login, registration, Google sign-in, logout
pub mod auth;
/// High-level client implementing the resource services
pub mod client;
/// Application configuration module
pub mod config;
/// Service traits for tasks, categories and subtasks
pub mod interfaces;
/// Rate limiter module for API request throttling
pub mod rate_limiter;
/// Service implementations on top of the authenticated transport
pub mod services;
