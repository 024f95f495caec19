use std::process::ExitCode;

use campus_seeder::{seed_database, SeederConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match SeederConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Error seeding database: {err:?}");
            return ExitCode::FAILURE;
        }
    };

    match seed_database(config).await {
        Ok(summary) => {
            info!(
                uid = %summary.user_uid,
                fallback_account = summary.used_fallback_account,
                users = summary.users.len(),
                rides = summary.rides.len(),
                requests = summary.requests.len(),
                "Database seeding completed successfully"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Error seeding database: {err:?}");
            ExitCode::FAILURE
        }
    }
}
