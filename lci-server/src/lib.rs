//! lci-server: order desk for Lecrafto International
//!
//! - Public order lookup by email or order number
//! - Public contact form that opens an inquiry
//! - Admin console API: login, inquiry list, status updates with tracking
//!   history and customer notifications

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod services;
pub mod state;
pub mod store;
