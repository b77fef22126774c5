pub mod auth;
pub mod method;
pub mod system;
