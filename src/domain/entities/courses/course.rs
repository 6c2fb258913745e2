use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 강좌 난이도
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// 강좌 엔티티 (`courses` 컬렉션)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub level: CourseLevel,
    pub price: f64,
    pub thumbnail: String,
    #[serde(default)]
    pub enrolled_students: Vec<ObjectId>,
    #[serde(default)]
    pub lectures: Vec<ObjectId>,
    pub instructor: ObjectId,
    #[serde(default)]
    pub is_published: bool,
    /// 강의 재생 시간 합계 (분)
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default)]
    pub total_lectures: u32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Course {
    pub fn new(
        title: String,
        category: String,
        price: f64,
        thumbnail: String,
        instructor: ObjectId,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            title,
            sub_title: None,
            description: None,
            category,
            level: CourseLevel::default(),
            price,
            thumbnail,
            enrolled_students: Vec::new(),
            lectures: Vec::new(),
            instructor,
            is_published: false,
            total_duration: 0.0,
            total_lectures: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.instructor == user_id
    }
}
