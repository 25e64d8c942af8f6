//! Line-oriented console over a token session.
//!
//! Input lines become session commands (or wallet account switches); every
//! published state snapshot is rendered back to stdout.

use alloy_primitives::Address;
use client::LocalWallet;
use session::{ActionKind, Command, Synchronizer, TokenContract, ViewState, WALLET_MISSING_MESSAGE};
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info};

pub const HELP: &str = "\
commands:
  mint <amount>              mint tokens to the active account
  burn <amount>              burn tokens (owner only)
  transfer <to> <amount>     send tokens to an address
  use <address>              switch the active wallet account
  accounts                   list wallet accounts
  connect                    request wallet access
  refresh                    re-read token data
  dismiss                    hide the notification banner
  show                       print the current state
  help                       print this help
  quit                       exit";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Unknown command `{0}` (type `help`)")]
    UnknownCommand(String),

    #[error("Usage: use <address>")]
    MissingAccount,

    #[error("Invalid address `{0}`")]
    InvalidAddress(String),
}

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Session(Command),
    SwitchAccount(Address),
    Accounts,
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// Missing amounts are passed through as empty strings; the session treats
/// an empty submission as a no-op.
pub fn parse_line(line: &str) -> Result<Option<Input>, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let mut arg = || words.next().unwrap_or_default().to_string();

    let input = match verb.to_ascii_lowercase().as_str() {
        "mint" => Input::Session(Command::SubmitMint(arg())),
        "burn" => Input::Session(Command::SubmitBurn(arg())),
        "transfer" | "send" => {
            let to = arg();
            let amount = arg();
            Input::Session(Command::SubmitTransfer { to, amount })
        }
        "connect" => Input::Session(Command::Connect),
        "refresh" => Input::Session(Command::Refresh),
        "dismiss" | "x" => Input::Session(Command::DismissBanner),
        "use" | "account" => {
            let raw = arg();
            if raw.is_empty() {
                return Err(ConsoleError::MissingAccount);
            }
            let address = raw
                .parse::<Address>()
                .map_err(|_| ConsoleError::InvalidAddress(raw))?;
            Input::SwitchAccount(address)
        }
        "accounts" => Input::Accounts,
        "show" | "status" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(ConsoleError::UnknownCommand(other.to_string())),
    };

    Ok(Some(input))
}

fn or_loading(value: &str) -> &str {
    if value.is_empty() {
        "loading.."
    } else {
        value
    }
}

fn button(state: &ViewState, kind: ActionKind, idle: &'static str) -> &'static str {
    if state.pending.is_pending(kind) {
        kind.busy_label()
    } else {
        idle
    }
}

/// Render a state snapshot.
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    if state.banner.visible {
        out.push_str(&format!("[!] {}\n", state.banner.message));
    }

    out.push_str(&format!(
        "Coin: {}  Ticker: {}  Tokens: {}\n",
        or_loading(&state.metadata.name),
        or_loading(&state.metadata.symbol),
        or_loading(&state.metadata.total_supply),
    ));

    let address = if state.wallet.connected || !state.wallet.address.is_zero() {
        state.wallet.address.to_string()
    } else {
        "not connected".to_string()
    };
    out.push_str(&format!("Your Address: {address}\n"));
    out.push_str(&format!("Balance: {}\n", or_loading(&state.balance)));

    out.push_str(&format!(
        "Transfer: to={} amount={} [{}]\n",
        state.transfer_draft.to,
        state.transfer_draft.amount,
        button(state, ActionKind::Transfer, "Transfer"),
    ));
    if let Some(warning) = state.burn_warning() {
        out.push_str(&format!("* {warning}\n"));
    }
    out.push_str(&format!(
        "Mint: {} [{}]\n",
        state.mint_draft,
        button(state, ActionKind::Mint, "Mint")
    ));
    out.push_str(&format!(
        "Burn: {} [{}]",
        state.burn_draft,
        button(state, ActionKind::Burn, "Burn")
    ));

    out
}

/// Drive `session` from stdin until `quit`, EOF or Ctrl-C.
pub async fn run_console<C>(
    session: Synchronizer<LocalWallet, C>,
    wallet: Option<LocalWallet>,
) -> eyre::Result<()>
where
    C: TokenContract + 'static,
{
    let view = session.subscribe_view();
    let (commands, rx) = mpsc::channel(32);
    let handle = tokio::spawn(session.run(rx));

    let mut updates = view.clone();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            println!("\n{}", render(&snapshot));
        }
    });

    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        let input = match parse_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match input {
            Input::Session(command) => {
                debug!(?command, "Dispatching command");
                if commands.send(command).await.is_err() {
                    break;
                }
            }
            Input::SwitchAccount(address) => match &wallet {
                Some(wallet) => {
                    if let Err(e) = wallet.switch_account(address) {
                        println!("{e}");
                    }
                }
                None => println!("{WALLET_MISSING_MESSAGE}"),
            },
            Input::Accounts => match &wallet {
                Some(wallet) => {
                    for (i, account) in wallet.accounts().iter().enumerate() {
                        let marker = if i == 0 { "*" } else { " " };
                        println!("{marker} {account}");
                    }
                }
                None => println!("{WALLET_MISSING_MESSAGE}"),
            },
            Input::Show => println!("{}", render(&view.borrow())),
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
        }
    }

    info!("Shutting down");
    let _ = commands.send(Command::Shutdown).await;
    handle.await?;
    renderer.abort();

    Ok(())
}
