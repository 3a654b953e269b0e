pub mod token;

pub use token::{OneTimeToken, TokenClaims};
