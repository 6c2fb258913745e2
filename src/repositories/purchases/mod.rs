pub mod purchase_repo;

pub use purchase_repo::PurchaseRepository;
