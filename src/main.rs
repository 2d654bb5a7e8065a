use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nef_faq_bot::bot;
use nef_faq_bot::config::BotConfig;
use nef_faq_bot::db::{Catalog, CatalogStore};
use nef_faq_bot::dialogue::ChatState;
use nef_faq_bot::seed;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_tracing();

    info!("Starting NEF FAQ Telegram Bot");

    let config = BotConfig::from_env().context("Invalid configuration")?;
    info!(
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.name,
        "Initializing catalog store"
    );

    let store = CatalogStore::connect_lazy(&config.database);

    // Without a database the bot still starts; users get error replies until it is reachable
    match seed::bootstrap(&store).await {
        Ok(report) => info!(?report, "Catalog ready"),
        Err(e) => error!(error = %e, "Catalog bootstrap failed, serving without a working store"),
    }

    let bot = Bot::new(config.bot_token.clone());

    if let Err(e) = bot.set_my_commands(bot::bot_commands()).await {
        error!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    let catalog: Arc<dyn Catalog> = Arc::new(store.clone());
    let config = Arc::new(config);

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![InMemStorage::<ChatState>::new(), catalog, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    store.close().await;
    info!("Bot stopped");

    Ok(())
}
