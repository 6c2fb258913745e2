//! 강의 엔티티

pub mod lecture;

pub use lecture::{round_duration, Lecture};
