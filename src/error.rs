// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Error

/// 서버 통신 오류
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP 401, 로그인이 필요한 요청
    #[error("Authentication required")]
    AuthRequired,

    /// 2xx 가 아닌 응답
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// 전송 전에 거부한 금액 (NaN, 무한대)
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

/// 오류 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthRequired,
    RequestFailed,
    NetworkError,
}

impl ApiError {
    /// 오류 종류 반환
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::AuthRequired => ErrorKind::AuthRequired,
            ApiError::RequestFailed { .. } | ApiError::InvalidAmount(_) => {
                ErrorKind::RequestFailed
            }
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::InvalidUrl(_) => {
                ErrorKind::NetworkError
            }
        }
    }

    pub fn is_auth_required(&self) -> bool {
        self.kind() == ErrorKind::AuthRequired
    }

    /// 실패 응답 본문에서 오류 생성
    /// `{"error": "..."}` 형태면 error 필드를, 아니면 본문 전체를, 본문이 비어 있으면 상태 코드 메시지를 사용
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("error")?.as_str().map(str::to_string))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    body.to_string()
                }
            });
        ApiError::RequestFailed { status, message }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// endregion: --- Error

// endregion: --- Tests
