//! 챌린지 관련 DTO

pub mod request;
pub mod response;
