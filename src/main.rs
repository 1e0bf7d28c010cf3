use std::process::ExitCode;

use mirrorprobe::config::{load_settings, setup_client};
use mirrorprobe::{Error, report};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let settings = load_settings()?;
    let client = setup_client(&settings).map_err(Error::Client)?;

    let ranked = mirrorprobe::run(&client, &settings).await?;
    report::log_ranking(&ranked, settings.top_n);
    Ok(())
}
