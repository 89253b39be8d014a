// src/lib.rs

pub mod cache;
pub mod config;
pub mod error;
pub mod etag;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
