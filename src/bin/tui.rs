use anyhow::Result;
use plancraft::cli::{self, Command};
use plancraft::context::{AppContext, StandardContext};
use plancraft::session::{FileSessionStore, SessionStore};
use plancraft::{i18n, logging};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = env::args();
    let binary_name = args.next().unwrap_or_else(|| "plancraft".to_string());

    let parsed = match cli::parse_args(args) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    if parsed.command == Command::Help {
        cli::print_help(&binary_name);
        return Ok(());
    }

    let ctx = StandardContext::new(parsed.root.clone());
    let mut cfg = match cli::load_or_onboard(&ctx) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration:\n{:#}", e);
            std::process::exit(1);
        }
    };
    if let Some(url) = parsed.api_url {
        cfg.api_url = url;
    }

    if parsed.command == Command::Tui {
        logging::init_file_logger(&ctx, &cfg.log_level)?;
    } else {
        logging::init_term_logger(&cfg.log_level)?;
    }
    i18n::init(cfg.language.as_deref());
    log::debug!("Data dir: {:?}", ctx.get_data_dir());

    let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&ctx)?);

    let result = match &parsed.command {
        Command::Tui => plancraft::tui::run(cfg, session).await,
        Command::Stats => cli::run_stats(&cfg, session).await,
        Command::Login { email } => cli::run_login(&cfg, session, email).await,
        Command::Logout => cli::run_logout(session.as_ref()),
        Command::Help => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
