// File: ./src/cli.rs
//! Command-line parsing and the headless commands (`stats`, `login`, `logout`).
use crate::auth::{self, LoginForm};
use crate::client::ApiClient;
use crate::config::Config;
use crate::context::AppContext;
use crate::dashboard::{Dashboard, FetchOrchestrator};
use crate::session::SessionStore;
use anyhow::{Result, anyhow, bail};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tui,
    Stats,
    Login { email: String },
    Logout,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub api_url: Option<String>,
    pub command: Command,
}

/// Parses the arguments after the binary name.
pub fn parse_args<I, S>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut root = None;
    let mut api_url = None;
    let mut command = None;

    let mut iter = args.into_iter().map(Into::into);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                command = Some(Command::Help);
            }
            "-r" | "--root" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--root requires a path"))?;
                root = Some(PathBuf::from(value));
            }
            "--api-url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--api-url requires a URL"))?;
                api_url = Some(value);
            }
            "stats" if command.is_none() => command = Some(Command::Stats),
            "logout" if command.is_none() => command = Some(Command::Logout),
            "login" if command.is_none() => {
                let email = iter
                    .next()
                    .ok_or_else(|| anyhow!("login requires an email address"))?;
                command = Some(Command::Login { email });
            }
            other => bail!("Unknown argument '{}'. Try --help.", other),
        }
    }

    Ok(CliArgs {
        root,
        api_url,
        command: command.unwrap_or(Command::Tui),
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "PlanCraft v{} - Terminal client for the PlanCraft task & goal tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]                  Start interactive TUI", binary_name);
    println!("    {} [OPTIONS] stats            Print the dashboard once", binary_name);
    println!("    {} [OPTIONS] login <email>    Log in and store the session", binary_name);
    println!("    {} [OPTIONS] logout           Forget the stored session", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    --api-url <url>       Override the API base URL for this run.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("KEYBINDINGS:");
    println!("    Login/Register   Tab/Shift-Tab/Up/Down: Move  Enter: Submit  Esc: Back");
    println!("    Dashboard        r: Refresh  j/k: Scroll  L: Logout  q: Quit");
    println!();
    println!("CONFIGURATION:");
    println!("    api_url, language, splash_delay_ms, request_timeout_secs, log_level");
    println!("    [dashboard] tasks_today, goal_stats (extra dashboard sections, off by default)");
}

/// Loads the configuration, or runs the interactive first-start setup when
/// none exists yet. Read and parse errors are returned as is.
pub fn load_or_onboard(ctx: &dyn AppContext) -> Result<Config> {
    let e = match Config::load(ctx) {
        Ok(cfg) => return Ok(cfg),
        Err(e) => e,
    };
    if !Config::is_missing_config_error(&e) {
        return Err(e);
    }

    println!("Welcome to PlanCraft. No configuration file found.");
    println!("Let's point the client at your PlanCraft server.\n");

    let mut new_config = Config::default();
    loop {
        print!("API URL [{}]: ", new_config.api_url);
        io::stdout().flush()?;
        let mut url = String::new();
        io::stdin().read_line(&mut url)?;
        let url = url.trim();
        if !url.is_empty() {
            new_config.api_url = url.to_string();
        }

        let candidate = ApiClient::new(
            &new_config.api_url,
            Arc::new(crate::session::MemorySessionStore::new()),
            new_config.request_timeout(),
        );
        match candidate {
            Ok(_) => break,
            Err(e) => {
                eprintln!("{}", e);
                new_config.api_url = Config::default().api_url;
            }
        }
    }

    if let Err(e) = new_config.save(ctx) {
        eprintln!("Warning: Could not save config file: {}", e);
    } else if let Ok(path) = Config::get_path_string(ctx) {
        println!("Configuration saved to: {}", path);
    }
    Ok(new_config)
}

/// Runs one dashboard cycle and prints it. Returns an error (exit code 1)
/// when the cycle ends in the error state.
pub async fn run_stats(cfg: &Config, session: Arc<dyn SessionStore>) -> Result<()> {
    let client = ApiClient::new(&cfg.api_url, session, cfg.request_timeout())?;
    let orchestrator = FetchOrchestrator::new(client, cfg.dashboard.clone());

    let mut dashboard = Dashboard::new();
    let ticket = dashboard.mount();
    if let Some(result) = orchestrator.run(ticket).await {
        dashboard.settle(ticket, result);
    }

    let render = dashboard.render();
    print!("{}", render);
    if let crate::dashboard::ViewState::Error(msg) = dashboard.state() {
        bail!("{}", msg);
    }
    Ok(())
}

pub async fn run_login(cfg: &Config, session: Arc<dyn SessionStore>, email: &str) -> Result<()> {
    let client = ApiClient::new(&cfg.api_url, session.clone(), cfg.request_timeout())?;
    let password = rpassword::prompt_password("Password: ")?;
    let form = LoginForm::new(email, &password);

    match auth::login(&client, session.as_ref(), &form).await {
        Ok(alert) => {
            println!("{}", alert.message);
            Ok(())
        }
        Err(alert) => bail!("{}", alert.message),
    }
}

pub fn run_logout(session: &dyn SessionStore) -> Result<()> {
    auth::logout(session)?;
    println!("Logged out.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_tui() {
        let args = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(args.command, Command::Tui);
        assert!(args.root.is_none());
    }

    #[test]
    fn test_parse_options_and_command() {
        let args = parse_args(["--root", "/tmp/pc", "--api-url", "http://x:1", "login", "a@b.c"])
            .unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/tmp/pc")));
        assert_eq!(args.api_url.as_deref(), Some("http://x:1"));
        assert_eq!(
            args.command,
            Command::Login {
                email: "a@b.c".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(["--root"]).is_err());
        assert!(parse_args(["login"]).is_err());
        assert!(parse_args(["frobnicate"]).is_err());
    }
}
