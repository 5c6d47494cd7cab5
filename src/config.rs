// region:    --- Imports
use crate::error::{ApiError, ApiResult};
use reqwest::Url;

// endregion: --- Imports

// region:    --- Client Config
const DEFAULT_API_URL: &str = "http://localhost:8000/";
const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";
const DEFAULT_LOGIN_PATH: &str = "/accounts/login/";

/// 클라이언트 설정
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
    pub login_path: String,
    /// 쿠키 저장소에 미리 넣어 둘 쿠키 (`name=value; name2=value2`)
    pub cookies: Option<String>,
    /// 페이지가 주입하는 인증 스냅샷(JSON)
    pub auth_context: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            csrf_cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            csrf_header_name: DEFAULT_CSRF_HEADER.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            cookies: None,
            auth_context: None,
        }
    }
}

impl ClientConfig {
    /// 환경 변수에서 설정 생성
    pub fn from_env() -> ApiResult<Self> {
        let defaults = Self::default();
        let base_url = match std::env::var("AUCTION_API_URL") {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => defaults.base_url,
        };

        Ok(Self {
            base_url,
            csrf_cookie_name: std::env::var("AUCTION_CSRF_COOKIE")
                .unwrap_or(defaults.csrf_cookie_name),
            csrf_header_name: std::env::var("AUCTION_CSRF_HEADER")
                .unwrap_or(defaults.csrf_header_name),
            login_path: std::env::var("AUCTION_LOGIN_PATH").unwrap_or(defaults.login_path),
            cookies: std::env::var("AUCTION_COOKIES").ok(),
            auth_context: std::env::var("AUCTION_AUTH_CONTEXT").ok(),
        })
    }

    pub fn with_base_url(mut self, raw: &str) -> ApiResult<Self> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    pub fn with_auth_context(mut self, auth_context: impl Into<String>) -> Self {
        self.auth_context = Some(auth_context.into());
        self
    }

    /// 상대 경로를 서버 URL 로 변환
    pub fn resolve(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

/// join 이 마지막 경로를 덮어쓰지 않도록 끝에 '/' 를 붙인다
fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
}

// endregion: --- Client Config

// endregion: --- Tests
