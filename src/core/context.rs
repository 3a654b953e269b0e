//! 애플리케이션 공유 상태
//!
//! 시작 시점에 한 번 조립되어 라우트 설정으로 전달됩니다.
//! 핸들러와 미들웨어는 여기서 복제한 핸들만 사용하고 전역 상태를 읽지 않습니다.

use std::sync::Arc;

use crate::config::{AppConfig, JwtConfig};
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::entities::challenges::challenge::Challenge;
use crate::domain::entities::users::user::User;
use crate::domain::entities::Entity;
use crate::middlewares::Protect;
use crate::repositories::{MemoryStore, Model, MongoStore};
use crate::services::auth::{PasswordService, TokenService};
use crate::services::mail::{mailer_from_config, Mailer};

#[derive(Clone)]
pub struct AppContext {
    pub users: Model<User>,
    pub challenges: Model<Challenge>,
    pub tokens: Arc<TokenService>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppContext {
    pub fn new(
        users: Model<User>,
        challenges: Model<Challenge>,
        tokens: Arc<TokenService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            challenges,
            tokens,
            mailer,
        }
    }

    /// MongoDB 컬렉션으로 컨텍스트를 만들고 유니크 인덱스를 준비합니다.
    pub async fn with_mongo(database: &Database, config: &AppConfig) -> AppResult<Self> {
        let passwords = PasswordService::new(config.password.bcrypt_cost);
        let db = database.get_database();

        let user_store = MongoStore::new(&db, User::COLLECTION);
        user_store.ensure_unique_indexes(User::UNIQUE_FIELDS).await?;

        let challenge_store = MongoStore::new(&db, Challenge::COLLECTION);
        challenge_store.ensure_unique_indexes(Challenge::UNIQUE_FIELDS).await?;

        Ok(Self::new(
            Model::new(Arc::new(user_store), passwords.clone()),
            Model::new(Arc::new(challenge_store), passwords),
            Arc::new(TokenService::new(config.jwt.clone())),
            mailer_from_config(&config.mail)?,
        ))
    }

    /// 메모리 저장소로 컨텍스트를 만듭니다.
    pub fn in_memory(jwt: JwtConfig, bcrypt_cost: u32, mailer: Arc<dyn Mailer>) -> Self {
        let passwords = PasswordService::new(bcrypt_cost);

        Self::new(
            Model::new(
                Arc::new(MemoryStore::with_unique_fields(User::UNIQUE_FIELDS)),
                passwords.clone(),
            ),
            Model::new(
                Arc::new(MemoryStore::with_unique_fields(Challenge::UNIQUE_FIELDS)),
                passwords,
            ),
            Arc::new(TokenService::new(jwt)),
            mailer,
        )
    }

    /// 세션 토큰 인증 미들웨어
    pub fn protect(&self) -> Protect {
        Protect::new(self.users.clone(), Arc::clone(&self.tokens))
    }
}
