// region:    --- Imports
use auction_client::app::App;
use auction_client::auction::model::{
    AnswerPayload, BidPayload, CreateItemPayload, QuestionPayload,
};
use auction_client::config::ClientConfig;
use auction_client::profile::model::{ProfileImage, ProfileUpdate};
use auction_client::router::Navigation;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Cli
#[derive(Parser)]
#[command(name = "auction-client", about = "온라인 경매 클라이언트")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 상품 목록
    Items {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// 상품 상세
    Item { id: i64 },
    /// 상품 등록
    Create {
        #[arg(long)]
        owner_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        starting_price: f64,
        /// RFC 3339 (예: 2026-12-01T00:00:00Z)
        #[arg(long)]
        end_time: DateTime<Utc>,
    },
    /// 입찰
    Bid {
        item_id: i64,
        #[arg(long)]
        bidder_id: i64,
        #[arg(long)]
        amount: f64,
    },
    /// 질문 등록
    Ask {
        item_id: i64,
        #[arg(long)]
        asker_id: i64,
        #[arg(long)]
        text: String,
    },
    /// 답변 등록
    Answer {
        item_id: i64,
        question_id: i64,
        #[arg(long)]
        responder_id: i64,
        #[arg(long)]
        text: String,
    },
    /// 내 프로필
    Profile,
    /// 프로필 수정
    UpdateProfile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// 라우트 이동 (인증 가드 확인)
    Navigate { path: String },
}
// endregion: --- Cli

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let app = App::mount(ClientConfig::from_env()?)?;
    info!("{:<12} --> 클라이언트 시작", "Main");

    match cli.command {
        Command::Items { query } => {
            app.auction.load_items(query.as_deref()).await;
            let state = app.auction.state();
            report(&state.items, state.error_message)
        }
        Command::Item { id } => {
            app.auction.load_item(id).await;
            let state = app.auction.state();
            report(&state.selected_item, state.error_message)
        }
        Command::Create {
            owner_id,
            title,
            description,
            starting_price,
            end_time,
        } => {
            let created = app
                .auction
                .create_new_item(CreateItemPayload {
                    owner_id,
                    title,
                    description,
                    starting_price,
                    end_time,
                })
                .await;
            report(&created, app.auction.state().error_message)
        }
        Command::Bid {
            item_id,
            bidder_id,
            amount,
        } => {
            app.auction
                .submit_bid(item_id, BidPayload { bidder_id, amount })
                .await;
            let state = app.auction.state();
            report(&state.selected_item, state.error_message)
        }
        Command::Ask {
            item_id,
            asker_id,
            text,
        } => {
            app.auction
                .submit_question(item_id, QuestionPayload { asker_id, text })
                .await;
            let state = app.auction.state();
            report(&state.selected_item, state.error_message)
        }
        Command::Answer {
            item_id,
            question_id,
            responder_id,
            text,
        } => {
            app.auction
                .submit_answer(item_id, question_id, AnswerPayload { responder_id, text })
                .await;
            let state = app.auction.state();
            report(&state.selected_item, state.error_message)
        }
        Command::Profile => {
            app.auth.fetch_profile().await;
            let state = app.auth.state();
            report(&state.user, state.error_message)
        }
        Command::UpdateProfile {
            first_name,
            last_name,
            email,
            date_of_birth,
            image,
        } => {
            let profile_image = match image {
                Some(path) => Some(read_image(path).await?),
                None => None,
            };
            let saved = app
                .auth
                .save_profile(ProfileUpdate {
                    first_name,
                    last_name,
                    email,
                    date_of_birth,
                    profile_image,
                })
                .await;
            report(&saved, app.auth.state().error_message)
        }
        Command::Navigate { path } => match app.router.navigate(&path, &app.auth).await {
            Navigation::Allow(route) => {
                println!("{} ({})", route.name, route.full_path);
                Ok(())
            }
            Navigation::Redirect(url) => {
                println!("redirect: {}", url);
                Ok(())
            }
        },
    }
}

/// 결과를 JSON 으로 출력, 오류 메시지가 있으면 실패 처리
fn report<T: Serialize>(
    value: &T,
    error_message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(message) = error_message {
        error!("{:<12} --> {}", "Main", message);
        return Err(message.into());
    }
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn read_image(path: PathBuf) -> Result<ProfileImage, std::io::Error> {
    let bytes = tokio::fs::read(&path).await?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let content_type = match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("profile_image")
        .to_string();

    Ok(ProfileImage {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}
// endregion: --- Main
