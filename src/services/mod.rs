pub mod auth;
pub mod identity;
pub mod password;
pub mod principals;
pub mod token;
pub mod validation;
