//! 라우트 테이블과 인증 가드
//! 인증이 필요한 라우트는 프로필 조회를 한 번 시도한 뒤에도 비로그인이면 로그인 페이지로 보낸다.
// region:    --- Imports
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::store::{AuthStatus, AuthStore};
use reqwest::Url;
use std::collections::HashMap;
use tracing::info;

// endregion: --- Imports

// region:    --- Routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
    /// 진입 시 다른 경로로 이동
    pub redirect: Option<&'static str>,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        pattern: "/",
        name: "Home",
        requires_auth: false,
        redirect: Some("/items"),
    },
    RouteDef {
        pattern: "/items",
        name: "Item List",
        requires_auth: false,
        redirect: None,
    },
    RouteDef {
        pattern: "/items/new",
        name: "New Item",
        requires_auth: true,
        redirect: None,
    },
    RouteDef {
        pattern: "/items/:id",
        name: "Item Detail",
        requires_auth: false,
        redirect: None,
    },
    RouteDef {
        pattern: "/profile",
        name: "Profile",
        requires_auth: true,
        redirect: None,
    },
];

const FALLBACK_PATH: &str = "/items";

/// 경로 매칭 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: &'static str,
    pub full_path: String,
    pub params: HashMap<String, String>,
    pub requires_auth: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(ResolvedRoute),
    /// 로그인 페이지 등 앱 외부로 이동
    Redirect(Url),
}

fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), actual.to_string());
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

// endregion: --- Routes

// region:    --- Router
pub struct Router {
    login_url: Url,
}

impl Router {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        Ok(Self {
            login_url: config.resolve(&config.login_path)?,
        })
    }

    /// 경로 매칭 (정적 경로가 파라미터 경로보다 먼저, 알 수 없는 경로는 목록으로)
    pub fn resolve(&self, full_path: &str) -> ResolvedRoute {
        self.resolve_with_depth(full_path, 0)
    }

    fn resolve_with_depth(&self, full_path: &str, depth: usize) -> ResolvedRoute {
        let path = full_path
            .split(['?', '#'])
            .next()
            .filter(|p| !p.is_empty())
            .unwrap_or("/");

        let matched = ROUTES
            .iter()
            .find_map(|route| match_pattern(route.pattern, path).map(|params| (route, params)));

        match matched {
            Some((route, _)) if route.redirect.is_some() && depth < ROUTES.len() => {
                let target = route.redirect.unwrap_or(FALLBACK_PATH);
                self.resolve_with_depth(target, depth + 1)
            }
            Some((route, params)) => ResolvedRoute {
                name: route.name,
                full_path: full_path.to_string(),
                params,
                requires_auth: route.requires_auth,
            },
            None if depth == 0 => self.resolve_with_depth(FALLBACK_PATH, depth + 1),
            None => ResolvedRoute {
                name: "Item List",
                full_path: FALLBACK_PATH.to_string(),
                params: HashMap::new(),
                requires_auth: false,
            },
        }
    }

    /// 로그인 후 돌아올 주소를 담은 로그인 URL
    pub fn login_redirect(&self, full_path: &str) -> Url {
        let mut url = self.login_url.clone();
        url.query_pairs_mut()
            .append_pair("next", &format!("/#{}", full_path));
        url
    }

    /// 라우트 진입 전 인증 확인
    pub async fn before_each(&self, to: ResolvedRoute, auth: &AuthStore) -> Navigation {
        if !to.requires_auth {
            return Navigation::Allow(to);
        }

        let state = auth.state();
        if state.status == AuthStatus::Loading {
            auth.wait_until_settled().await;
        } else if !state.is_authenticated && !state.profile_requested {
            auth.fetch_profile().await;
        }

        if auth.is_authenticated() {
            Navigation::Allow(to)
        } else {
            info!(
                "{:<12} --> 인증 필요 라우트 차단: {}",
                "Router", to.full_path
            );
            Navigation::Redirect(self.login_redirect(&to.full_path))
        }
    }

    pub async fn navigate(&self, full_path: &str, auth: &AuthStore) -> Navigation {
        let route = self.resolve(full_path);
        info!("{:<12} --> 이동: {} ({})", "Router", route.full_path, route.name);
        self.before_each(route, auth).await
    }
}

impl ResolvedRoute {
    /// 숫자 경로 파라미터 (`/items/:id`)
    pub fn id_param(&self, name: &str) -> ApiResult<i64> {
        let raw = self
            .params
            .get(name)
            .ok_or_else(|| ApiError::InvalidUrl(format!("missing route parameter: {}", name)))?;
        raw.parse()
            .map_err(|_| ApiError::InvalidUrl(format!("invalid route parameter {}: {}", name, raw)))
    }
}

// endregion: --- Router

// endregion: --- Tests
