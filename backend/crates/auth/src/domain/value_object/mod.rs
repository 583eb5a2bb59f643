//! Value Object Module

pub mod auth_token_id;
pub mod email;
pub mod user_id;
pub mod user_name;
pub mod user_password;
pub mod user_role;
