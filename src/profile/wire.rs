// region:    --- Imports
use super::model::{AuthContext, ProfileUpdate, UserProfile};
use crate::error::ApiResult;
use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

// endregion: --- Imports

// region:    --- Profile Wire
#[derive(Debug, Deserialize)]
pub struct ApiUserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl From<ApiUserProfile> for UserProfile {
    fn from(profile: ApiUserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            date_of_birth: profile.date_of_birth,
            profile_image_url: profile.profile_image_url,
        }
    }
}

/// 페이지에 주입되는 인증 스냅샷 (`isAuthenticated` + snake_case 프로필)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAuthContext {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<ApiUserProfile>,
}

impl From<ApiAuthContext> for AuthContext {
    fn from(context: ApiAuthContext) -> Self {
        Self {
            is_authenticated: context.is_authenticated,
            user: context.user.map(UserProfile::from),
        }
    }
}

impl AuthContext {
    pub fn from_json(raw: &str) -> ApiResult<Self> {
        let context: ApiAuthContext = serde_json::from_str(raw)?;
        Ok(context.into())
    }
}

/// 프로필 수정 multipart 폼 생성
pub fn profile_update_form(update: ProfileUpdate) -> ApiResult<Form> {
    let mut form = Form::new();
    if let Some(first_name) = update.first_name {
        form = form.text("first_name", first_name);
    }
    if let Some(last_name) = update.last_name {
        form = form.text("last_name", last_name);
    }
    if let Some(email) = update.email {
        form = form.text("email", email);
    }
    if let Some(date_of_birth) = update.date_of_birth {
        form = form.text("date_of_birth", date_of_birth.format("%Y-%m-%d").to_string());
    }
    if let Some(image) = update.profile_image {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        form = form.part("profile_image", part);
    }
    Ok(form)
}

// endregion: --- Profile Wire

// endregion: --- Tests
