use clap::Parser;
use dotenv::dotenv;
use roulette_sim::commands::start;
use roulette_sim::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env has to be loaded before clap reads the environment fallbacks
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::parse();
    log::debug!("starting with {settings:?}");
    start(settings).await
}
