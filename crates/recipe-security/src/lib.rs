//! # Recipe Security
//! 
//! Security utilities: JWT access tokens and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtError, JwtService};
pub use password::{PasswordError, PasswordService};
