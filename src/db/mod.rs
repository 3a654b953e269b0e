//! Database Connection Management Module
//!
//! MongoDB 클라이언트 연결을 관리합니다.
//! 연결 정보는 [`DatabaseConfig`]로 주입됩니다.
//!
//! ```rust,ignore
//! let database = Database::new(&config.database).await?;
//! let context = AppContext::with_mongo(&database, &config).await?;
//! ```

use log::info;
use mongodb::{options::ClientOptions, Client};

use crate::config::DatabaseConfig;
use crate::core::errors::{AppError, AppResult};

/// MongoDB 데이터베이스 연결 래퍼
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 새 MongoDB 연결을 만들고 `ping`으로 확인합니다.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB URI 해석 실패: {}", e)))?;

        client_options.app_name = Some("challenge_api".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 클라이언트 생성 실패: {}", e)))?;

        client
            .database(&config.name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;

        info!("✅ MongoDB 연결 성공: {}", config.name);

        Ok(Self {
            client,
            database_name: config.name.clone(),
        })
    }

    /// `mongodb::Database` 핸들
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}
