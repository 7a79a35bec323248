pub mod access;
pub mod auth;
