use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 상품 요약 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starting_price: f64,
    pub end_time: DateTime<Utc>,
    pub has_ended: bool,
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: i64,
    pub bidder_id: i64,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

// 답변 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub responder_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// 질문 모델 (답변은 최대 1개)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub asker_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub answer: Option<Answer>,
}

// 낙찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningBid {
    pub id: i64,
    pub bidder_id: i64,
    pub amount: f64,
}

// 상품 상세 모델
// 낙찰 정보는 경매 종료 후에만 존재하며 서버가 보장한다
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    #[serde(flatten)]
    pub summary: ItemSummary,
    pub bids: Vec<Bid>,
    pub questions: Vec<Question>,
    pub winning_bid: Option<WinningBid>,
}

impl ItemDetail {
    pub fn id(&self) -> i64 {
        self.summary.id
    }

    pub fn question(&self, question_id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemSummary>,
}

/// 생성 응답 (`{id}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResource {
    pub id: i64,
}

// region:    --- Payloads
/// 상품 등록 요청
#[derive(Debug, Clone, PartialEq)]
pub struct CreateItemPayload {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub starting_price: f64,
    pub end_time: DateTime<Utc>,
}

/// 입찰 요청
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BidPayload {
    pub bidder_id: i64,
    pub amount: f64,
}

/// 질문 등록 요청
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPayload {
    pub asker_id: i64,
    pub text: String,
}

/// 답변 등록 요청
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerPayload {
    pub responder_id: i64,
    pub text: String,
}
// endregion: --- Payloads
