/// Security primitives: credential hashing and bearer tokens
pub mod password;
pub mod tokens;

pub use tokens::{Claims, TokenError, TokenKeys};
