//! 상태 저장소
//! 각 저장소는 자신의 상태를 watch 채널로 소유하며, 상태 변경마다 구독자에게 알린다.
//! 같은 저장소에서 겹치는 요청은 마지막에 끝난 요청이 상태를 덮어쓴다.
pub mod auction;
pub mod auth;

pub use auction::{AuctionState, AuctionStore};
pub use auth::{AuthState, AuthStatus, AuthStore};

use crate::error::ApiError;

/// 액션별 사용자 메시지
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActionMessages {
    pub auth_required: &'static str,
    pub fallback: &'static str,
}

impl ActionMessages {
    /// 인증 필요 오류는 고정 메시지, 그 외에는 오류 메시지(비어 있으면 기본 메시지)
    pub(crate) fn describe(&self, err: &ApiError) -> String {
        if err.is_auth_required() {
            return self.auth_required.to_string();
        }
        let message = err.to_string();
        if message.trim().is_empty() {
            self.fallback.to_string()
        } else {
            message
        }
    }
}
