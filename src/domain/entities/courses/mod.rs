//! 강좌 엔티티

pub mod course;

pub use course::{Course, CourseLevel};
