use redmock::Emulator;
use redmock::config::Config;
use redmock::session;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_args(&args);

    // RUST_LOG wins over --loglevel. Logs go to stderr; stdout carries replies only.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.loglevel))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut emulator = Emulator::new();
    let stdout = tokio::io::stdout();

    match &config.file {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            session::run_session(BufReader::new(file), stdout, &mut emulator, &config).await
        }
        None => session::run_session(BufReader::new(tokio::io::stdin()), stdout, &mut emulator, &config).await,
    }
}
