use clap::Parser;
use derivative::Derivative;

#[derive(Parser, Derivative)]
#[derivative(Debug)]
#[command(name = "citytime-bot", about = "Telegram bot telling the local time of a city")]
pub struct Opt {
    /// Config file path
    #[arg(short, long, value_parser, default_value = "config.toml")]
    pub config: clio::Input,

    /// Telegram Bot API token
    #[arg(long, env = "TELEGRAM_API_TOKEN", hide_env_values = true)]
    #[derivative(Debug = "ignore")]
    pub token: String,
}
