//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정값은 시작 시점에 [`AppConfig::from_env`]로 한 번 읽히고,
//! 이후에는 명시적으로 전달된 값 객체로만 사용됩니다.
//! 어떤 컴포넌트도 요청 처리 중에 환경 변수를 직접 읽지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경, 해싱, 요청 제한 설정
//! - [`auth_config`] - JWT, 메일 발송 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use challenge_api_backend::config::AppConfig;
//!
//! let config = AppConfig::from_env();
//! println!("Server will bind to {}", config.server.bind_address());
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub mail: MailConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// 환경 변수에서 전체 설정을 읽습니다.
    pub fn from_env() -> Self {
        let environment = Environment::current();

        let config = Self {
            password: PasswordConfig::from_env(&environment),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            mail: MailConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            cors: CorsConfig::from_env(),
            environment,
        };

        log::info!(
            "설정 로드됨: environment={:?}, bcrypt_cost={}, rate_limit={:?}",
            config.environment,
            config.password.bcrypt_cost,
            config.rate_limit
        );

        config
    }
}
