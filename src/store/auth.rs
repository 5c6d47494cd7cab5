// region:    --- Imports
use super::ActionMessages;
use crate::profile::model::{AuthContext, ProfileUpdate, UserProfile};
use crate::profile::ProfileService;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Messages
const FETCH_PROFILE: ActionMessages = ActionMessages {
    auth_required: "Please sign in to view your profile.",
    fallback: "Unable to load profile.",
};

const SAVE_PROFILE: ActionMessages = ActionMessages {
    auth_required: "Please sign in to update your profile.",
    fallback: "Unable to update profile.",
};

// endregion: --- Messages

// region:    --- Auth State
/// 인증 상태 머신 (idle -> loading -> ready | error)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub status: AuthStatus,
    pub error_message: Option<String>,
    /// 프로필 조회를 한 번이라도 시도했는지
    pub profile_requested: bool,
}

// endregion: --- Auth State

// region:    --- Auth Store
pub struct AuthStore {
    service: Arc<dyn ProfileService>,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    pub fn new(service: Arc<dyn ProfileService>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { service, state }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    /// 페이지 스냅샷을 그대로 반영하고 ready 로 전환
    pub fn bootstrap(&self, context: Option<AuthContext>) {
        info!(
            "{:<12} --> 인증 스냅샷 적용: {}",
            "AuthStore",
            context.as_ref().map_or(false, |c| c.is_authenticated)
        );
        self.state.send_modify(|state| {
            if let Some(context) = context {
                state.user = context.user;
                state.is_authenticated = context.is_authenticated;
            }
            state.status = AuthStatus::Ready;
        });
    }

    /// 진행 중인 조회/수정이 끝날 때까지 대기
    pub async fn wait_until_settled(&self) {
        let mut receiver = self.state.subscribe();
        let _ = receiver
            .wait_for(|state| state.status != AuthStatus::Loading)
            .await;
    }

    /// 프로필 조회
    /// 401 은 오류가 아니라 비로그인 상태로 처리한다
    pub async fn fetch_profile(&self) {
        info!("{:<12} --> 프로필 조회", "AuthStore");
        self.state.send_modify(|state| {
            state.status = AuthStatus::Loading;
            state.error_message = None;
            state.profile_requested = true;
        });

        match self.service.get_profile().await {
            Ok(profile) => self.state.send_modify(|state| {
                state.user = Some(profile);
                state.is_authenticated = true;
                state.status = AuthStatus::Ready;
            }),
            Err(e) if e.is_auth_required() => {
                info!("{:<12} --> 비로그인 상태", "AuthStore");
                self.state.send_modify(|state| {
                    state.user = None;
                    state.is_authenticated = false;
                    state.status = AuthStatus::Ready;
                });
            }
            Err(e) => {
                let message = FETCH_PROFILE.describe(&e);
                warn!("{:<12} --> 프로필 조회 실패: {}", "AuthStore", message);
                self.state.send_modify(|state| {
                    state.status = AuthStatus::Error;
                    state.error_message = Some(message);
                });
            }
        }
    }

    /// 프로필 수정
    pub async fn save_profile(&self, update: ProfileUpdate) -> Option<UserProfile> {
        info!("{:<12} --> 프로필 수정", "AuthStore");
        self.state.send_modify(|state| {
            state.status = AuthStatus::Loading;
            state.error_message = None;
        });

        match self.service.update_profile(update).await {
            Ok(profile) => {
                let updated = profile.clone();
                self.state.send_modify(|state| {
                    state.user = Some(profile);
                    state.status = AuthStatus::Ready;
                });
                Some(updated)
            }
            Err(e) => {
                let message = SAVE_PROFILE.describe(&e);
                warn!("{:<12} --> 프로필 수정 실패: {}", "AuthStore", message);
                self.state.send_modify(|state| {
                    state.status = AuthStatus::Error;
                    state.error_message = Some(message);
                });
                None
            }
        }
    }
}

// endregion: --- Auth Store

// endregion: --- Tests
