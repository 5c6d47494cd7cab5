// region:    --- Imports
use super::model::{
    AnswerPayload, BidPayload, CreateItemPayload, CreatedResource, ItemDetail, ItemListResponse,
    QuestionPayload,
};
use super::wire::{
    ApiAnswerRequest, ApiBidRequest, ApiCreateItemRequest, ApiItemDetail, ApiItemListResponse,
    ApiQuestionRequest,
};
use crate::error::ApiResult;
use crate::transport::{HttpTransport, RequestOptions};
use async_trait::async_trait;
use tracing::info;

// endregion: --- Imports

// region:    --- Auction Service Trait
/// 경매 API 트레이트
#[async_trait]
pub trait AuctionService: Send + Sync {
    /// 상품 목록 조회 (검색어는 그대로 전달)
    async fn get_items(&self, query: Option<&str>) -> ApiResult<ItemListResponse>;

    async fn get_item(&self, item_id: i64) -> ApiResult<ItemDetail>;

    async fn create_item(&self, payload: &CreateItemPayload) -> ApiResult<CreatedResource>;

    async fn place_bid(&self, item_id: i64, payload: &BidPayload) -> ApiResult<CreatedResource>;

    async fn post_question(
        &self,
        item_id: i64,
        payload: &QuestionPayload,
    ) -> ApiResult<CreatedResource>;

    async fn post_answer(
        &self,
        question_id: i64,
        payload: &AnswerPayload,
    ) -> ApiResult<CreatedResource>;
}

// endregion: --- Auction Service Trait

// region:    --- Auction Api
/// HTTP 경매 API 구현체
#[derive(Clone)]
pub struct AuctionApi {
    transport: HttpTransport,
}

impl AuctionApi {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    async fn post<B: serde::Serialize + Send + Sync>(
        &self,
        path: &str,
        body: B,
    ) -> ApiResult<CreatedResource> {
        let body = serde_json::to_value(body)?;
        self.transport
            .fetch_json(path, RequestOptions::post_json(body))
            .await
    }
}

#[async_trait]
impl AuctionService for AuctionApi {
    async fn get_items(&self, query: Option<&str>) -> ApiResult<ItemListResponse> {
        info!("{:<12} --> 상품 목록 조회: query={:?}", "AuctionApi", query);
        let mut options = RequestOptions::get();
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            options = options.with_query("q", query);
        }
        let response: ApiItemListResponse =
            self.transport.fetch_json("/auctions/items/", options).await?;
        Ok(response.into())
    }

    async fn get_item(&self, item_id: i64) -> ApiResult<ItemDetail> {
        info!("{:<12} --> 상품 상세 조회 id: {}", "AuctionApi", item_id);
        let response: ApiItemDetail = self
            .transport
            .fetch_json(&format!("/auctions/items/{}/", item_id), RequestOptions::get())
            .await?;
        Ok(response.into())
    }

    async fn create_item(&self, payload: &CreateItemPayload) -> ApiResult<CreatedResource> {
        info!("{:<12} --> 상품 등록: {}", "AuctionApi", payload.title);
        self.post("/auctions/items/create/", ApiCreateItemRequest::try_from(payload)?)
            .await
    }

    async fn place_bid(&self, item_id: i64, payload: &BidPayload) -> ApiResult<CreatedResource> {
        info!(
            "{:<12} --> 입찰 id: {}, bidder: {}, amount: {}",
            "AuctionApi", item_id, payload.bidder_id, payload.amount
        );
        self.post(
            &format!("/auctions/items/{}/bids/", item_id),
            ApiBidRequest::try_from(payload)?,
        )
        .await
    }

    async fn post_question(
        &self,
        item_id: i64,
        payload: &QuestionPayload,
    ) -> ApiResult<CreatedResource> {
        info!("{:<12} --> 질문 등록 id: {}", "AuctionApi", item_id);
        self.post(
            &format!("/auctions/items/{}/questions/", item_id),
            ApiQuestionRequest::from(payload),
        )
        .await
    }

    async fn post_answer(
        &self,
        question_id: i64,
        payload: &AnswerPayload,
    ) -> ApiResult<CreatedResource> {
        info!("{:<12} --> 답변 등록 question: {}", "AuctionApi", question_id);
        self.post(
            &format!("/auctions/questions/{}/answers/", question_id),
            ApiAnswerRequest::from(payload),
        )
        .await
    }
}

// endregion: --- Auction Api
