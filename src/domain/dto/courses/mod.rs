pub mod request;
pub mod response;

pub use request::{CreateCourseRequest, UpdateCourseRequest};
pub use response::CourseResponse;
