use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 강의 엔티티 (`lectures` 컬렉션)
///
/// 하나의 강좌에 속하며, 강좌 문서의 `lectures` 배열에도 ID가 기록됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecture {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub course: ObjectId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub video_url: String,
    /// 재생 시간 (분, 소수점 둘째 자리까지)
    #[serde(default)]
    pub duration: f64,
    pub public_id: String,
    #[serde(default)]
    pub is_preview: bool,
    pub order: u32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Lecture {
    pub fn new(
        course: ObjectId,
        title: String,
        video_url: String,
        public_id: String,
        duration: f64,
        order: u32,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            course,
            title,
            description: None,
            video_url,
            duration: round_duration(duration),
            public_id,
            is_preview: false,
            order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 재생 시간을 소수점 둘째 자리로 반올림합니다.
pub fn round_duration(duration: f64) -> f64 {
    (duration * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_is_rounded_to_two_decimals() {
        assert_eq!(round_duration(12.3456), 12.35);
        assert_eq!(round_duration(7.0), 7.0);
        assert_eq!(round_duration(0.004), 0.0);
    }

    #[test]
    fn test_new_lecture_rounds_duration() {
        let lecture = Lecture::new(
            ObjectId::new(),
            "Ownership".to_string(),
            "https://cdn.example.com/v/1.mp4".to_string(),
            "v/1".to_string(),
            9.999,
            1,
        );

        assert_eq!(lecture.duration, 10.0);
        assert!(!lecture.is_preview);
    }
}
