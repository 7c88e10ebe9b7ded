pub mod account;
pub mod authentication;
pub mod identity;
pub mod session;
pub mod timeout;
pub mod user;
