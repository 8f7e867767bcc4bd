use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use moodbrew::app::{App, Flow};
use moodbrew::auth::{self, AuthStorage};
use moodbrew::banner::{BannerInfo, print_banner, print_session_summary};
use moodbrew::brewer::gemini::GeminiBrewer;
use moodbrew::config::{Config, KNOWN_KEYS, Overrides, Settings};
use moodbrew::consts::{API_KEY_ENV_VARS, PROVIDER, default_db_path};
use moodbrew::session::BrewSession;

#[derive(Parser)]
#[command(name = "moodbrew", version, about = "Tell it how you feel, get a drink to match.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Brew a single mood and exit (non-interactive)
    #[arg(short, long)]
    mood: Option<String>,

    /// Gemini model for the drink concept
    #[arg(long)]
    text_model: Option<String>,

    /// Imagen model for the drink photo
    #[arg(long)]
    image_model: Option<String>,

    /// Directory generated images are written to
    #[arg(short, long)]
    image_dir: Option<PathBuf>,

    /// SQLite database for config and credentials (default: ~/.moodbrew/moodbrew.db)
    #[arg(short, long)]
    db: Option<String>,

    /// Open each generated image in the system viewer
    #[arg(long, default_value_t = false)]
    open: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Save a Gemini API key
    Login,
    /// Remove the saved API key
    Logout,
    /// Show or change stored settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print all stored settings
    List,
    /// Print one setting
    Get { key: String },
    /// Store a setting
    Set { key: String, value: String },
    /// Remove a setting
    Unset { key: String },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "moodbrew=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_db_path(db: Option<String>) -> anyhow::Result<String> {
    if let Some(db) = db {
        return Ok(db);
    }
    let path = default_db_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(path.to_string_lossy().into_owned())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let db_path = resolve_db_path(cli.db)?;

    if let Some(command) = &cli.command {
        return match command {
            Command::Login => handle_login(&db_path),
            Command::Logout => handle_logout(&db_path),
            Command::Config { action } => handle_config(&db_path, action.as_ref()),
        };
    }

    let config = Config::open(&db_path)?;
    let settings = Settings::resolve(
        &config,
        Overrides {
            text_model: cli.text_model,
            image_model: cli.image_model,
            image_dir: cli.image_dir,
        },
    )?;

    let auth = AuthStorage::open(&db_path)?;
    let auth_status = auth.status(PROVIDER, API_KEY_ENV_VARS)?;
    let brewer = GeminiBrewer::new(
        Some(settings.text_model.clone()),
        Some(settings.image_model.clone()),
        auth,
    );
    let session = BrewSession::new(Box::new(brewer));

    if cli.mood.is_none() {
        print_banner(&BannerInfo {
            text_model: &settings.text_model,
            image_model: &settings.image_model,
            auth_status: &auth_status,
            image_dir: &settings.image_dir,
        });
    }

    let mut app = App::new(session, settings, auth_status, db_path, cli.open);

    // Single mood mode
    if let Some(mood) = cli.mood {
        return app.brew_once(&mood).await;
    }

    app.show();

    // REPL, async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\n{}", app.prompt());
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        tracing::error!("input error: {e}");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        if app.handle_line(&line).await == Flow::Quit {
            break;
        }
    }

    print_session_summary(app.session().brews(), app.session().usage());
    Ok(())
}

fn handle_login(db_path: &str) -> anyhow::Result<()> {
    println!("Get a key at https://aistudio.google.com/app/apikey\n");
    print!("Paste your Gemini API key: ");
    io::stdout().flush()?;
    let mut key = String::new();
    io::stdin().read_line(&mut key)?;

    auth::login(db_path, PROVIDER, &key)?;

    println!("✓ API key saved to {db_path}");
    Ok(())
}

fn handle_logout(db_path: &str) -> anyhow::Result<()> {
    auth::logout(db_path, PROVIDER)?;
    println!("✓ Saved API key removed.");
    Ok(())
}

fn handle_config(db_path: &str, action: Option<&ConfigAction>) -> anyhow::Result<()> {
    let config = Config::open(db_path)?;
    let check = |key: &str| -> anyhow::Result<()> {
        if !KNOWN_KEYS.contains(&key) {
            bail!("unknown key: {key} (known: {})", KNOWN_KEYS.join(", "));
        }
        Ok(())
    };

    match action.unwrap_or(&ConfigAction::List) {
        ConfigAction::List => {
            for (key, value) in config.entries()? {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Get { key } => {
            check(key)?;
            if let Some(value) = config.get(key)? {
                println!("{value}");
            }
        }
        ConfigAction::Set { key, value } => {
            check(key)?;
            config.set(key, value)?;
            println!("✓ {key} = {value}");
        }
        ConfigAction::Unset { key } => {
            check(key)?;
            config.remove(key)?;
            println!("✓ {key} removed");
        }
    }
    Ok(())
}
