//! 챌린지 엔티티

pub mod challenge;

pub use challenge::Challenge;
