//! 서버 응답/요청 형식 (snake_case, 금액은 10진 문자열)
//! 뷰 모델과의 변환은 From 구현으로 처리한다
// region:    --- Imports
use super::model::{
    Answer, AnswerPayload, Bid, BidPayload, CreateItemPayload, ItemDetail, ItemListResponse,
    ItemSummary, Question, QuestionPayload, WinningBid,
};
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Decimal
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Text(String),
    Number(f64),
}

/// "12.50" -> 12.5, 숫자도 허용
pub(crate) fn deserialize_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match DecimalRepr::deserialize(deserializer)? {
        DecimalRepr::Number(value) => Ok(value),
        DecimalRepr::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| de::Error::custom(format!("invalid decimal amount: {:?}", text))),
    }
}

/// 소수점 둘째 자리까지 (100.0 -> "100.00", 0.1 + 0.2 -> "0.30")
pub(crate) fn format_decimal(value: f64) -> ApiResult<String> {
    if !value.is_finite() {
        return Err(ApiError::InvalidAmount(value));
    }
    Ok(format!("{:.2}", value))
}

// endregion: --- Decimal

// region:    --- Responses
#[derive(Debug, Deserialize)]
pub struct ApiItemSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub starting_price: f64,
    pub end_time: DateTime<Utc>,
    pub has_ended: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiBid {
    pub id: i64,
    pub bidder_id: i64,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ApiAnswer {
    pub id: i64,
    pub responder_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ApiQuestion {
    pub id: i64,
    pub asker_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub answer: Option<ApiAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct ApiWinningBid {
    pub id: i64,
    pub bidder_id: i64,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct ApiItemDetail {
    #[serde(flatten)]
    pub summary: ApiItemSummary,
    #[serde(default)]
    pub bids: Vec<ApiBid>,
    #[serde(default)]
    pub questions: Vec<ApiQuestion>,
    #[serde(default)]
    pub winning_bid: Option<ApiWinningBid>,
}

#[derive(Debug, Deserialize)]
pub struct ApiItemListResponse {
    pub items: Vec<ApiItemSummary>,
}

impl From<ApiItemSummary> for ItemSummary {
    fn from(item: ApiItemSummary) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            starting_price: item.starting_price,
            end_time: item.end_time,
            has_ended: item.has_ended,
        }
    }
}

impl From<ApiBid> for Bid {
    fn from(bid: ApiBid) -> Self {
        Self {
            id: bid.id,
            bidder_id: bid.bidder_id,
            amount: bid.amount,
            created_at: bid.created_at,
        }
    }
}

impl From<ApiAnswer> for Answer {
    fn from(answer: ApiAnswer) -> Self {
        Self {
            id: answer.id,
            responder_id: answer.responder_id,
            text: answer.text,
            created_at: answer.created_at,
        }
    }
}

impl From<ApiQuestion> for Question {
    fn from(question: ApiQuestion) -> Self {
        Self {
            id: question.id,
            asker_id: question.asker_id,
            text: question.text,
            created_at: question.created_at,
            answer: question.answer.map(Answer::from),
        }
    }
}

impl From<ApiWinningBid> for WinningBid {
    fn from(winning_bid: ApiWinningBid) -> Self {
        Self {
            id: winning_bid.id,
            bidder_id: winning_bid.bidder_id,
            amount: winning_bid.amount,
        }
    }
}

impl From<ApiItemDetail> for ItemDetail {
    fn from(item: ApiItemDetail) -> Self {
        Self {
            summary: item.summary.into(),
            bids: item.bids.into_iter().map(Bid::from).collect(),
            questions: item.questions.into_iter().map(Question::from).collect(),
            winning_bid: item.winning_bid.map(WinningBid::from),
        }
    }
}

impl From<ApiItemListResponse> for ItemListResponse {
    fn from(response: ApiItemListResponse) -> Self {
        Self {
            items: response.items.into_iter().map(ItemSummary::from).collect(),
        }
    }
}

// endregion: --- Responses

// region:    --- Requests
#[derive(Debug, Serialize)]
pub struct ApiCreateItemRequest<'a> {
    pub owner_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub starting_price: String,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiBidRequest {
    pub bidder_id: i64,
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct ApiQuestionRequest<'a> {
    pub asker_id: i64,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ApiAnswerRequest<'a> {
    pub responder_id: i64,
    pub text: &'a str,
}

impl<'a> TryFrom<&'a CreateItemPayload> for ApiCreateItemRequest<'a> {
    type Error = ApiError;

    fn try_from(payload: &'a CreateItemPayload) -> ApiResult<Self> {
        Ok(Self {
            owner_id: payload.owner_id,
            title: &payload.title,
            description: &payload.description,
            starting_price: format_decimal(payload.starting_price)?,
            end_time: payload.end_time,
        })
    }
}

impl TryFrom<&BidPayload> for ApiBidRequest {
    type Error = ApiError;

    fn try_from(payload: &BidPayload) -> ApiResult<Self> {
        Ok(Self {
            bidder_id: payload.bidder_id,
            amount: format_decimal(payload.amount)?,
        })
    }
}

impl<'a> From<&'a QuestionPayload> for ApiQuestionRequest<'a> {
    fn from(payload: &'a QuestionPayload) -> Self {
        Self {
            asker_id: payload.asker_id,
            text: &payload.text,
        }
    }
}

impl<'a> From<&'a AnswerPayload> for ApiAnswerRequest<'a> {
    fn from(payload: &'a AnswerPayload) -> Self {
        Self {
            responder_id: payload.responder_id,
            text: &payload.text,
        }
    }
}

// endregion: --- Requests

// endregion: --- Tests
