//! PostgreSQL queries, one module per table

pub mod inquiries;
pub mod tracking;
pub mod user_roles;
pub mod users;
