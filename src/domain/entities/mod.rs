//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 대응되는 엔티티를 정의합니다.
//!
//! ## 컬렉션 매핑
//!
//! | 엔티티 | 컬렉션 |
//! |--------|--------|
//! | [`users::User`] | `users` |
//! | [`courses::Course`] | `courses` |
//! | [`lectures::Lecture`] | `lectures` |
//! | [`purchases::Purchase`] | `course_purchases` |
//!
//! 모든 엔티티는 다음 규칙을 따릅니다:
//! - `_id`는 `Option<ObjectId>`이며 삽입 전에는 `None`
//! - 생성/수정 시각은 BSON `DateTime`으로 저장
//! - 다른 문서는 ID(`ObjectId`)로만 참조

pub mod courses;
pub mod lectures;
pub mod purchases;
pub mod users;
