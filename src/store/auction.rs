// region:    --- Imports
use super::ActionMessages;
use crate::auction::model::{
    AnswerPayload, BidPayload, CreateItemPayload, CreatedResource, ItemDetail, ItemSummary,
    QuestionPayload,
};
use crate::auction::AuctionService;
use crate::error::{ApiError, ApiResult};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

// endregion: --- Imports

// region:    --- Messages
const LOAD_ITEMS: ActionMessages = ActionMessages {
    auth_required: "Please sign in to view auction items.",
    fallback: "Unable to load items.",
};

const LOAD_ITEM: ActionMessages = ActionMessages {
    auth_required: "Please sign in to view this item.",
    fallback: "Unable to load item.",
};

const CREATE_ITEM: ActionMessages = ActionMessages {
    auth_required: "Please sign in to create an item.",
    fallback: "Unable to create item.",
};

const PLACE_BID: ActionMessages = ActionMessages {
    auth_required: "Please sign in to place a bid.",
    fallback: "Unable to place bid.",
};

const POST_QUESTION: ActionMessages = ActionMessages {
    auth_required: "Please sign in to ask a question.",
    fallback: "Unable to post question.",
};

const POST_ANSWER: ActionMessages = ActionMessages {
    auth_required: "Please sign in to answer a question.",
    fallback: "Unable to post answer.",
};

// endregion: --- Messages

// region:    --- Auction State
/// 경매 상태 (서버가 확인한 데이터만 반영)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuctionState {
    /// 서버 응답 순서 그대로
    pub items: Vec<ItemSummary>,
    pub selected_item: Option<ItemDetail>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

// endregion: --- Auction State

// region:    --- Auction Store
pub struct AuctionStore {
    service: Arc<dyn AuctionService>,
    state: watch::Sender<AuctionState>,
}

impl AuctionStore {
    pub fn new(service: Arc<dyn AuctionService>) -> Self {
        let (state, _) = watch::channel(AuctionState::default());
        Self { service, state }
    }

    /// 현재 상태 스냅샷
    pub fn state(&self) -> AuctionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuctionState> {
        self.state.subscribe()
    }

    /// 상품 목록 조회 (목록 교체)
    pub async fn load_items(&self, query: Option<&str>) {
        info!("{:<12} --> 상품 목록 조회: query={:?}", "Store", query);
        self.begin();
        match self.service.get_items(query).await {
            Ok(response) => {
                debug!("{:<12} --> 상품 {}개 수신", "Store", response.items.len());
                self.state.send_modify(|state| state.items = response.items);
            }
            Err(e) => self.fail(&LOAD_ITEMS, &e),
        }
        self.finish();
    }

    /// 상품 상세 조회 (선택 상품 교체)
    pub async fn load_item(&self, item_id: i64) {
        info!("{:<12} --> 상품 상세 조회 id: {}", "Store", item_id);
        self.begin();
        match self.service.get_item(item_id).await {
            Ok(item) => self.state.send_modify(|state| state.selected_item = Some(item)),
            Err(e) => self.fail(&LOAD_ITEM, &e),
        }
        self.finish();
    }

    /// 상품 등록 후 상세를 다시 조회해 목록 맨 앞에 추가
    pub async fn create_new_item(&self, payload: CreateItemPayload) -> Option<ItemDetail> {
        info!("{:<12} --> 상품 등록: {}", "Store", payload.title);
        self.begin();
        let created = match self.create_and_fetch(&payload).await {
            Ok(item) => {
                let summary = item.summary.clone();
                self.state.send_modify(|state| state.items.insert(0, summary));
                Some(item)
            }
            Err(e) => {
                self.fail(&CREATE_ITEM, &e);
                None
            }
        };
        self.finish();
        created
    }

    /// 입찰 후 상품 상세 갱신
    pub async fn submit_bid(&self, item_id: i64, payload: BidPayload) -> bool {
        info!("{:<12} --> 입찰 id: {}", "Store", item_id);
        self.begin();
        let result = self
            .refresh_after(item_id, self.service.place_bid(item_id, &payload))
            .await;
        self.commit_selected(result, &PLACE_BID)
    }

    /// 질문 등록 후 상품 상세 갱신
    pub async fn submit_question(&self, item_id: i64, payload: QuestionPayload) -> bool {
        info!("{:<12} --> 질문 등록 id: {}", "Store", item_id);
        self.begin();
        let result = self
            .refresh_after(item_id, self.service.post_question(item_id, &payload))
            .await;
        self.commit_selected(result, &POST_QUESTION)
    }

    /// 답변 등록 후 질문이 속한 상품 상세 갱신
    pub async fn submit_answer(
        &self,
        item_id: i64,
        question_id: i64,
        payload: AnswerPayload,
    ) -> bool {
        info!(
            "{:<12} --> 답변 등록 id: {}, question: {}",
            "Store", item_id, question_id
        );
        self.begin();
        let result = self
            .refresh_after(item_id, self.service.post_answer(question_id, &payload))
            .await;
        self.commit_selected(result, &POST_ANSWER)
    }

    async fn create_and_fetch(&self, payload: &CreateItemPayload) -> ApiResult<ItemDetail> {
        let created = self.service.create_item(payload).await?;
        self.service.get_item(created.id).await
    }

    async fn refresh_after(
        &self,
        item_id: i64,
        mutation: impl Future<Output = ApiResult<CreatedResource>>,
    ) -> ApiResult<ItemDetail> {
        let created = mutation.await?;
        debug!("{:<12} --> 생성 id: {}", "Store", created.id);
        self.service.get_item(item_id).await
    }

    fn commit_selected(&self, result: ApiResult<ItemDetail>, messages: &ActionMessages) -> bool {
        let succeeded = match result {
            Ok(item) => {
                self.state.send_modify(|state| state.selected_item = Some(item));
                true
            }
            Err(e) => {
                self.fail(messages, &e);
                false
            }
        };
        self.finish();
        succeeded
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });
    }

    fn finish(&self) {
        self.state.send_modify(|state| state.is_loading = false);
    }

    fn fail(&self, messages: &ActionMessages, err: &ApiError) {
        let message = messages.describe(err);
        warn!("{:<12} --> 요청 실패: {}", "Store", message);
        self.state
            .send_modify(|state| state.error_message = Some(message));
    }
}

// endregion: --- Auction Store

// endregion: --- Tests
