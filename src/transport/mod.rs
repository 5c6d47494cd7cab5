//! 서버 통신 어댑터
//! 쿠키(세션, CSRF 토큰)를 유지하고 JSON 요청/응답을 처리한다.
//! 재시도, 타임아웃은 없다. 실패 처리는 호출자가 결정한다.
// region:    --- Imports
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

// endregion: --- Imports

// region:    --- Request Options
/// 요청 본문
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

/// 요청 옵션 (메서드, 본문, 헤더, 쿼리)
#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: RequestBody::Empty,
            headers: HeaderMap::new(),
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post_json(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::Json(body),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// GET, HEAD, OPTIONS, TRACE 외의 메서드는 상태를 변경하는 요청
pub fn is_mutating(method: &Method) -> bool {
    !matches!(method.as_str(), "GET" | "HEAD" | "OPTIONS" | "TRACE")
}

// endregion: --- Request Options

// region:    --- Http Transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let jar = Arc::new(Jar::default());
        if let Some(cookies) = &config.cookies {
            for cookie in cookies.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                jar.add_cookie_str(cookie, &config.base_url);
            }
        }

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self {
            client,
            jar,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 쿠키 저장소에서 쿠키 값 조회
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.cookie_for(&self.config.base_url, name)
    }

    fn cookie_for(&self, url: &Url, name: &str) -> Option<String> {
        let header = self.jar.cookies(url)?;
        let header = header.to_str().ok()?;
        header.split(';').map(str::trim).find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }

    /// 요청 전송 후 JSON 응답 디코딩
    /// 204 응답은 JSON null 로 디코딩한다 (`()` 또는 `Option<T>` 로 받는다)
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let RequestOptions {
            method,
            body,
            mut headers,
            query,
        } = options;

        let mut url = self.config.resolve(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if is_mutating(&method) {
            self.attach_csrf_token(&url, &mut headers);
            if !headers.contains_key(CONTENT_TYPE) && !matches!(body, RequestBody::Multipart(_)) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
        }

        info!("{:<12} --> {} {}", "Transport", method, url.path());

        let request = self.client.request(method, url).headers(headers);
        let request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("{:<12} --> 인증 필요 (401)", "Transport");
            return Err(ApiError::AuthRequired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{:<12} --> 요청 실패: status={}", "Transport", status);
            return Err(ApiError::from_response_body(status.as_u16(), &body));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }

        let bytes = response.bytes().await?;
        debug!("{:<12} --> 응답 수신: {} bytes", "Transport", bytes.len());
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn attach_csrf_token(&self, url: &Url, headers: &mut HeaderMap) {
        let Some(token) = self.cookie_for(url, &self.config.csrf_cookie_name) else {
            debug!("{:<12} --> CSRF 쿠키 없음", "Transport");
            return;
        };
        match (
            HeaderName::from_bytes(self.config.csrf_header_name.as_bytes()),
            HeaderValue::from_str(&token),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!("{:<12} --> CSRF 헤더 생성 실패", "Transport"),
        }
    }
}

// endregion: --- Http Transport

// endregion: --- Tests
