pub mod auth_services;
pub mod password;
pub mod session_store;
