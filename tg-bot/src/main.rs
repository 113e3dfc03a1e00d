//! Telegram bot telling the current time in a city

use std::io::read_to_string;
use std::sync::Arc;

use citytime::geo::NominatimGeocoder;
use citytime::timezone::PolygonLookup;
use citytime::{Conversation, LocationResolver, Strings, TimezoneResolver};
use clap::Parser;
use color_eyre::Result;
use teloxide::Bot;
use teloxide::requests::Requester;
use tracing::info;

use crate::config::{Config, LogFormat};
use crate::opt::Opt;

mod config;
mod opt;
mod transport;

/// Initializes tracing collection
fn setup_tracing(config: config::Logging) -> Result<()> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let fmt_layer = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
    };

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let filter_layer = config
        .filters
        .into_iter()
        .fold(filter_layer, |layer, filter| layer.add_directive(filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let Opt {
        config: mut config_file,
        token,
    } = Opt::parse();

    let config = read_to_string(&mut config_file)?;
    let config: Config = toml::from_str(&config)?;

    setup_tracing(config.logging)?;
    color_eyre::install()?;

    info!(
        config = ?config_file.path().path(),
        "Tracing initialized, setting up the bot"
    );

    let strings = Strings::load(&config.strings)?;
    info!(strings = ?config.strings, "Strings loaded");

    let timeout = config.geocoder.timeout()?;
    let geocoder = NominatimGeocoder::new(
        config.geocoder.url.as_str(),
        &config.geocoder.user_agent,
        timeout,
    )?;
    let locations = LocationResolver::with_timeout(Arc::new(geocoder), timeout);

    let timezones = TimezoneResolver::new(Arc::new(PolygonLookup::new()));
    info!("Timezone boundaries loaded");

    let bot = Bot::new(token);
    let me = bot.get_me().await?;
    let mut conversation = Conversation::new(strings, locations, timezones);
    if let Some(username) = &me.user.username {
        info!(%username, "Bot identity fetched");
        conversation = conversation.with_bot_username(username);
    }

    transport::serve(bot, Arc::new(conversation)).await;

    info!("Bot stopped, tearing down");
    Ok(())
}
