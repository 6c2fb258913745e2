use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::users::UserRole;

/// 회원 가입 요청 DTO
///
/// JSON 역직렬화 후 핸들러에서 `validate()`로 검증합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50, message = "Name is required and cannot exceed 50 characters"))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// 지정하지 않으면 `student`
    #[validate(custom(function = "validate_signup_role"))]
    pub role: Option<UserRole>,
}

/// 가입 시 관리자 역할은 선택할 수 없음
fn validate_signup_role(role: &UserRole) -> Result<(), ValidationError> {
    if *role == UserRole::Admin {
        return Err(ValidationError::new("invalid_role")
            .with_message("Please select a valid role".into()));
    }
    Ok(())
}
