pub mod auth;
pub mod principal;
pub mod ticket;
