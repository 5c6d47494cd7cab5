// region:    --- Imports
use super::model::{ProfileUpdate, UserProfile};
use super::wire::{profile_update_form, ApiUserProfile};
use crate::error::ApiResult;
use crate::transport::{HttpTransport, RequestBody, RequestOptions};
use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

// endregion: --- Imports

// region:    --- Profile Service Trait
/// 프로필 API 트레이트
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_profile(&self) -> ApiResult<UserProfile>;

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<UserProfile>;
}

// endregion: --- Profile Service Trait

// region:    --- Profile Api
#[derive(Clone)]
pub struct ProfileApi {
    transport: HttpTransport,
}

impl ProfileApi {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ProfileService for ProfileApi {
    async fn get_profile(&self) -> ApiResult<UserProfile> {
        info!("{:<12} --> 프로필 조회", "ProfileApi");
        let profile: ApiUserProfile = self
            .transport
            .fetch_json("/accounts/profile/", RequestOptions::get())
            .await?;
        Ok(profile.into())
    }

    /// multipart PATCH 로 프로필 수정
    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<UserProfile> {
        info!("{:<12} --> 프로필 수정", "ProfileApi");
        let options = RequestOptions {
            method: Method::PATCH,
            body: RequestBody::Multipart(profile_update_form(update)?),
            ..RequestOptions::default()
        };
        let profile: ApiUserProfile = self
            .transport
            .fetch_json("/accounts/profile/update/", options)
            .await?;
        Ok(profile.into())
    }
}

// endregion: --- Profile Api
