//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, Base64url)
//! - Password hashing (Argon2id)
//! - Bearer credential extraction from request headers

pub mod bearer;
pub mod crypto;
pub mod password;
