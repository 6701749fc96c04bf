use tokio::io::BufReader;

use menu_orders::{console, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "menu_orders=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let app_state = AppState::init()?;
    tracing::info!(tax_rate = %app_state.config.tax_rate, "store ready");

    let watcher = console::spawn_order_watcher(&app_state).await;

    println!("{}", console::HELP);
    let stdin = BufReader::new(tokio::io::stdin());
    console::run(app_state, stdin, tokio::io::stdout()).await?;

    watcher.abort();
    Ok(())
}
