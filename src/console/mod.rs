//! Line-oriented front end over the shared store.

mod dto;
pub mod handlers;

pub use dto::{Command, ParseError, HELP};

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::state::AppState;
use handlers::Outcome;

/// Read commands until `quit` or end of input, writing each reply.
pub async fn run<R, W>(state: AppState, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        output.write_all(state.config.prompt.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await.context("read command")? else {
            break;
        };
        let reply = match line.parse::<Command>() {
            Ok(cmd) => {
                debug!(?cmd, "command");
                let mut store = state.store.lock().await;
                match handlers::handle(&mut store, cmd) {
                    Outcome::Print(text) => text,
                    Outcome::Quit => break,
                }
            }
            Err(ParseError::Empty) => continue,
            Err(e) => e.to_string(),
        };
        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}

/// Log every order-history snapshot from a background task, the way a
/// history view would re-render on its own context.
pub async fn spawn_order_watcher(state: &AppState) -> JoinHandle<()> {
    let mut orders = state.store.lock().await.subscribe_orders();
    tokio::spawn(async move {
        while let Some(history) = orders.recv().await {
            let newest = history.keys().next_back().copied();
            info!(orders = history.len(), ?newest, "order history updated");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn session(script: &str) -> String {
        let state = AppState::fake();
        let mut out = Vec::new();
        run(state, script.as_bytes(), &mut out).await.expect("session runs");
        String::from_utf8(out).expect("utf8 output")
    }

    #[tokio::test]
    async fn runs_until_quit() {
        let out = session("add 1 to Lunch x2\nquit\nadd 2 to Lunch\n").await;
        assert!(out.contains("added 2x Pizza to 'Lunch'"));
        assert!(!out.contains("Burger"));
    }

    #[tokio::test]
    async fn parse_errors_are_reported_and_blank_lines_skipped() {
        let out = session("\nfrobnicate\n").await;
        assert!(out.contains("unknown command 'frobnicate'"));
    }
}
