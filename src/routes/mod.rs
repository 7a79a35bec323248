pub mod auth;
pub mod customers;
pub mod employees;
pub mod health;
pub mod tickets;
