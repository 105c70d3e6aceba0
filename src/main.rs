use anyhow::Result;
use sonic_console::api::{AgentApi, ApiConfig};
use sonic_console::console::{ApiBackend, Console, SonicWallet};
use sonic_console::wallet::{ChainClient, ChainConfig};
use sonic_console::ConsoleState;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let backend = ApiBackend::new(AgentApi::new(ApiConfig::default()));
    let wallet = SonicWallet::new(ChainClient::new(ChainConfig::default()));
    let console = Console::new(backend, wallet);

    // Adopt an agent that is already running before the first render.
    console.refresh_status().await;

    println!("Decentralized Autonomous Twitter Agent");
    println!("commands: connect | start | post <prompt> | image <prompt> | reply | like | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(&console.snapshot().await);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        match cmd {
            "" => {}
            "connect" => console.connect_wallet().await,
            "start" | "stop" => console.start_stop().await,
            "post" => console.post_tweet(rest).await,
            "image" => console.post_with_image(rest).await,
            "reply" => console.reply_to_tweet().await,
            "like" => console.like_tweet().await,
            "quit" | "exit" => break,
            other => {
                println!("unknown command: {other}");
                continue;
            }
        }
        render(&console.snapshot().await);
    }

    Ok(())
}

fn render(state: &ConsoleState) {
    println!();
    println!("== Status and Logs ==");
    if state.logs.is_empty() {
        println!("No logs yet...");
    } else {
        for log in &state.logs {
            println!("{log}");
        }
    }
    println!("--");
    if let Some(session) = &state.wallet {
        match session.balance {
            Some(balance) => println!("wallet: {} ({balance:.3} S)", session.short_account()),
            None => println!("wallet: {} (balance unavailable)", session.short_account()),
        }
    }
    if let Some(notice) = &state.wallet_notice {
        println!("wallet notice: {notice}");
    }
    if let Some(url) = &state.install_url {
        println!("no wallet detected - install one from {url}");
    }
    if let Some(receipt) = &state.payment {
        println!("payment: {}", receipt.link);
    }
    let agent = if state.running { "[Stop Agent]" } else { "[Start Agent]" };
    match state.active {
        Some(kind) => println!("{agent}  action in flight: {}", kind.label()),
        None => println!("{agent}  actions ready"),
    }
}
