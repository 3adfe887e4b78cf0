pub mod auth;
pub mod finance;
pub mod notification;
pub mod template;
pub mod user;
