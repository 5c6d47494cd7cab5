use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 사용자 프로필 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_image_url: Option<String>,
}

/// 프로필 이미지 업로드
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 프로필 수정 요청 (값이 있는 필드만 전송)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_image: Option<ProfileImage>,
}

/// 페이지 로드 시점의 인증 스냅샷
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
}

impl AuthContext {
    pub fn unauthenticated() -> Self {
        Self::default()
    }
}
