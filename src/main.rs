use plz_geocoder::{config, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    logging::init(&config.log_level, config.log_format == "json");
    config.print_summary();

    plz_geocoder::server::run(config).await
}
