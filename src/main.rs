use clap::Parser;
use colored::*;
use std::process;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use saarthi::api::HttpGateway;
use saarthi::app::{repl, ChatApp};
use saarthi::cli::Args;
use saarthi::config::Config;
use saarthi::session::{FileStorage, KeyValueStorage, MemoryStorage, SessionStore};
use saarthi::ui::{display_error, display_notice, display_warning, render_sidebar};

fn init_logging(verbose: bool) {
    // SAARTHI_LOG takes the usual filter syntax, e.g. `saarthi=trace`
    let filter = EnvFilter::try_from_env("SAARTHI_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "saarthi=debug,warn" } else { "warn" })
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_storage(config: &Config) -> Arc<dyn KeyValueStorage> {
    if config.ephemeral {
        return Arc::new(MemoryStorage::new());
    }
    match &config.data_dir {
        Some(dir) => {
            let storage = FileStorage::new(dir);
            display_notice(
                config.verbose,
                &format!("storage: {}", storage.data_dir().display()),
            );
            Arc::new(storage)
        }
        None => {
            display_warning("no data directory found, chats will not be remembered");
            Arc::new(MemoryStorage::new())
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };
    init_logging(config.verbose);

    let store = SessionStore::new(open_storage(&config));

    if args.clear {
        match store.clear() {
            Ok(()) => {
                println!("{}", "All local chats forgotten.".green());
                return;
            }
            Err(e) => {
                display_error(&format!("clearing chats: {}", e));
                process::exit(1);
            }
        }
    }

    if args.list {
        let stored = store.load();
        print!(
            "{}",
            render_sidebar(&stored.summaries, stored.active_session.as_deref())
        );
        return;
    }

    let gateway = match HttpGateway::new(&config.base_url, config.timeout_secs) {
        Ok(gateway) => gateway,
        Err(e) => {
            display_error(&e.to_string());
            process::exit(1);
        }
    };
    display_notice(config.verbose, &format!("backend: {}", gateway.base_url()));

    let mut app = ChatApp::new(store, Arc::new(gateway));
    if args.new_session {
        app.start_new_session().await;
    } else if let Some(session_id) = &args.session {
        app.switch_session(session_id).await;
    } else {
        app.init().await;
    }

    if let Err(e) = repl::run(app, &config).await {
        display_error(&e.to_string());
        process::exit(1);
    }
}
