use barcodewars::{AppConfig, GameSession, ScanResult, ScoreCalculator, SqliteStatsStore};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for scan results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "barcodewars=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    info!(database_url = %config.database_url, "Starting Barcode Wars");

    let store = match SqliteStatsStore::open(&config).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            error!(?err, "Could not open stats database");
            println!("Your stats could not be loaded: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut session = match GameSession::start(store, ScoreCalculator::new()).await {
        Ok(session) => session,
        Err(err) => {
            error!(?err, "Could not start game session");
            println!("{}", err.user_message());
            return ExitCode::FAILURE;
        }
    };

    println!("Scan a barcode (one per line, blank line to cancel, Ctrl-D to quit).");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut exit = ExitCode::SUCCESS;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                error!(?err, "Failed to read scan input");
                exit = ExitCode::FAILURE;
                break;
            }
        };

        // A blank line is the scanner coming back empty-handed, so the shell
        // never submits an empty scan and never shows NothingCredited.
        let scan = match line.trim() {
            "" => ScanResult::Cancelled,
            text => ScanResult::scanned(text),
        };

        match session.handle_scan(scan).await {
            Ok(outcome) => println!("{}\n", outcome.message()),
            Err(err) if err.is_terminal() => {
                error!(?err, "Stopping after storage failure");
                println!("{}", err.user_message());
                exit = ExitCode::FAILURE;
                break;
            }
            Err(err) => println!("{}\n", err.user_message()),
        }
    }

    session.close().await;
    info!("Barcode Wars stopped");
    exit
}
