//! Internal company directory: a MongoDB-backed user CRUD API plus the
//! HTTP client and dashboard view-state consumed by the admin frontend.

pub mod api;
pub mod client;
pub mod dashboard;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;
