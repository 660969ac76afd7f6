use aktel_api::{config::Config, tracing_config};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    let config = Config::parse();

    tracing_config::configure("aktel", config.production())?;

    let server = aktel_api::create_server(config).await?;
    server.run().await?;

    Ok(())
}
