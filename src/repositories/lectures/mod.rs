pub mod lecture_repo;

pub use lecture_repo::LectureRepository;
