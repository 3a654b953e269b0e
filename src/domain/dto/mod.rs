//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 데이터 구조를 정의합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── body.rs             # 원시 JSON 본문 추출자
//! ├── users/
//! │   ├── request/        # 연산별 스키마, 비밀번호 재설정 요청
//! │   └── response/       # UserResponse
//! └── challenges/
//!     ├── request.rs      # 챌린지/풀이 제출 스키마
//!     └── response.rs     # ChallengeResponse
//! ```
//!
//! 요청 본문은 대부분 [`RequestBody`]로 받아 필드 화이트리스트와
//! [`Schema`](crate::utils::validation::Schema) 검증을 거친 뒤 사용합니다.
//! 응답 DTO는 숨김 필드를 구조적으로 배제하는 역할을 합니다.

pub mod body;
pub mod users;
pub mod challenges;

pub use body::RequestBody;
