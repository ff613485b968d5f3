use std::sync::Arc;

use anyhow::{Context, Result};
use board_client::config::ClientConfig;
use board_client::debug::{self, DebugConfig};
use board_client::services::api::{cards, ApiClient};
use board_client::sync::{ColumnEvent, ColumnSync};
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use serde::Serialize;
use shared::{CreateCardRequest, UpdateCardRequest};

#[derive(Parser)]
#[command(name = "board")]
#[command(version, about = "Taskify board card client")]
struct Cli {
    /// API root (overrides BOARD_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Cookie header to resolve the session token from, e.g. "accessToken=..."
    #[arg(long, global = true)]
    cookie: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the first page of cards in a column
    List {
        #[arg(long)]
        column: i64,
    },
    /// Show one card
    Get { card_id: i64 },
    /// Create a card
    Create {
        #[arg(long)]
        dashboard: i64,
        #[arg(long)]
        column: i64,
        #[arg(long)]
        assignee: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        due_date: String,
        /// Repeat for several tags; order is kept
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Change some fields of a card and resend the rest
    Update {
        card_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due_date: Option<String>,
        /// Move the card to another column
        #[arg(long)]
        column: Option<i64>,
        #[arg(long)]
        assignee: Option<i64>,
        /// Replaces all tags when given
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a card
    Delete { card_id: i64 },
    /// Mount a column, print its cards once loaded, unmount
    Watch {
        #[arg(long)]
        column: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = debug::init_logger(&DebugConfig::from_env());

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("failed to read client configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }

    let mut client = ApiClient::new(config).context("failed to build API client")?;
    if let Some(cookie) = cli.cookie {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&cookie).context("--cookie is not a valid header value")?,
        );
        client = client.for_server_request(headers);
    }

    match cli.command {
        Commands::List { column } => print_json(&cards::list_cards(&client, column).await?),
        Commands::Get { card_id } => print_json(&cards::get_card(&client, card_id).await?),
        Commands::Create {
            dashboard,
            column,
            assignee,
            title,
            description,
            due_date,
            tags,
            image_url,
        } => {
            let request = CreateCardRequest {
                assignee_user_id: assignee,
                dashboard_id: dashboard,
                column_id: column,
                title,
                description,
                due_date,
                tags,
                image_url,
            };
            print_json(&cards::create_card(&client, &request).await?)
        }
        Commands::Update {
            card_id,
            title,
            description,
            due_date,
            column,
            assignee,
            tags,
            image_url,
        } => {
            let current = cards::get_card(&client, card_id).await?;
            let mut request = UpdateCardRequest::from_card(&current.card);

            if let Some(title) = title {
                request.title = title;
            }
            if let Some(description) = description {
                request.description = description;
            }
            if let Some(due_date) = due_date {
                request.due_date = due_date;
            }
            if let Some(column) = column {
                request.column_id = column;
            }
            if let Some(assignee) = assignee {
                request.assignee_user_id = assignee;
            }
            if !tags.is_empty() {
                request.tags = tags;
            }
            if image_url.is_some() {
                request.image_url = image_url;
            }

            print_json(&cards::update_card(&client, card_id, &request).await?)
        }
        Commands::Delete { card_id } => {
            cards::delete_card(&client, card_id).await?;
            println!("deleted card {card_id}");
            Ok(())
        }
        Commands::Watch { column } => watch(client, column).await,
    }
}

async fn watch(client: ApiClient, column_id: i64) -> Result<()> {
    let (unit, events) = ColumnSync::new(column_id, Arc::new(client));

    if let Some(fetch) = unit.mount() {
        fetch.await.context("column fetch task failed")?;
    }

    let outcome = match events.try_recv() {
        Ok(ColumnEvent::FetchFailed { error, .. }) => Err(error.into()),
        _ => print_json(&unit.snapshot().cards),
    };

    unit.unmount();
    outcome
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
