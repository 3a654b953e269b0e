//! 사용자(Principal) 엔티티

pub mod user;

pub use user::{Role, User};
