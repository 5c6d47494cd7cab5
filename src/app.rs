//! 애플리케이션 구성
//! 전송 계층, API, 저장소, 라우터를 연결하고 인증 스냅샷으로 초기화한다.
// region:    --- Imports
use crate::auction::AuctionApi;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::profile::model::AuthContext;
use crate::profile::ProfileApi;
use crate::router::Router;
use crate::store::{AuctionStore, AuthStore};
use crate::transport::HttpTransport;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- App
pub struct App {
    pub transport: HttpTransport,
    pub auction: AuctionStore,
    pub auth: AuthStore,
    pub router: Router,
}

impl App {
    /// 구성 요소 생성 후 인증 스냅샷 적용
    /// 스냅샷이 없거나 읽을 수 없으면 비로그인으로 시작한다
    pub fn mount(config: ClientConfig) -> ApiResult<Self> {
        let context = match config.auth_context.as_deref() {
            Some(raw) => AuthContext::from_json(raw).unwrap_or_else(|e| {
                warn!("{:<12} --> 인증 스냅샷 파싱 실패: {}", "App", e);
                AuthContext::unauthenticated()
            }),
            None => AuthContext::unauthenticated(),
        };

        let router = Router::new(&config)?;
        let transport = HttpTransport::new(config)?;
        let auction = AuctionStore::new(Arc::new(AuctionApi::new(transport.clone())));
        let auth = AuthStore::new(Arc::new(ProfileApi::new(transport.clone())));
        auth.bootstrap(Some(context));

        info!(
            "{:<12} --> 초기화 완료: {}",
            "App",
            transport.config().base_url
        );

        Ok(Self {
            transport,
            auction,
            auth,
            router,
        })
    }
}

// endregion: --- App
