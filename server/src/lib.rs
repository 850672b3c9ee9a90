//! Furniture inventory library
//!
//! This library exposes the inventory store, photo store, item services
//! and HTTP routes so they can be tested and embedded.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod services;
pub mod storage;
pub mod views;
