use punchclock::commands::Cli;
use punchclock::libs::messages::macros::is_debug_mode;
use punchclock::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("punchclock=debug")))
            .with_target(false)
            .init();
    }

    if let Err(err) = Cli::menu().await {
        msg_error!(err);
        std::process::exit(1);
    }
}
