//! 데이터 액세스 계층
//!
//! # Modules
//!
//! - [`store`] - 컬렉션 단위 [`DocumentStore`] trait
//! - [`mongo_store`] - MongoDB 구현, 유니크 인덱스 관리
//! - [`memory_store`] - 테스트/로컬용 메모리 구현
//! - [`model`] - 엔티티 타입을 얹은 [`Model`]과 [`Query`]
//!
//! # Examples
//!
//! ```rust,ignore
//! let store = MongoStore::new(&database.get_database(), User::COLLECTION);
//! store.ensure_unique_indexes(User::UNIQUE_FIELDS).await?;
//!
//! let users: Model<User> = Model::new(Arc::new(store), passwords);
//! let user = users.find_by_id(&id)?.one().await?;
//! ```

pub mod store;
pub mod mongo_store;
pub mod memory_store;
pub mod model;

pub use store::{DocumentStore, FindOptions, Update};
pub use mongo_store::MongoStore;
pub use memory_store::MemoryStore;
pub use model::{Model, Query};
