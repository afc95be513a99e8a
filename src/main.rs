mod cli;
mod logging;
mod pipeline;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    cli::run().await?;

    Ok(())
}
