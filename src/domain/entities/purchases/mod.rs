//! 강좌 구매 엔티티

pub mod purchase;

pub use purchase::{Purchase, PurchaseStatus};
