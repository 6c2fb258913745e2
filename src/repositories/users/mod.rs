//! 사용자 데이터 액세스 계층
//!
//! [`UserRepository`](user_repo::UserRepository)는 인증 게이트의
//! [`UserLookup`](crate::services::auth::UserLookup) 구현도 겸합니다.

pub mod user_repo;

pub use user_repo::UserRepository;
