use std::io::BufRead;

use clap::Parser;

use article_schema_reset::app::{self, SUCCESS_MESSAGE};
use article_schema_reset::cli::{Cli, Command};
use article_schema_reset::db::Snapshot;
use article_schema_reset::{Config, Result};

#[tokio::main]
async fn main() {
    // Initialize logging (RUST_LOG if set, otherwise warnings and errors)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!("Failure class: {:?}", e.kind());
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);

    match cli.command() {
        Command::Reset => {
            app::reset(&config).await?;
            println!("{}", SUCCESS_MESSAGE);
        }
        Command::Status { json } => {
            let snapshot = app::status(&config).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.counts())?);
            } else {
                print_status(&snapshot);
            }
        }
        Command::CheckAdmin { username } => {
            let mut password = String::new();
            if std::io::stdin().lock().read_line(&mut password)? == 0 {
                return Err(anyhow::anyhow!("expected a password on stdin").into());
            }
            let password = password.trim_end_matches(['\r', '\n']);

            app::check_admin(&config, &username, password).await?;
            println!("Password matches for admin {:?}", username);
        }
    }

    Ok(())
}

fn print_status(snapshot: &Snapshot) {
    for (table, count) in snapshot.counts().by_table() {
        println!("{:<15}{}", table, count);
    }

    for article in &snapshot.articles {
        let bumped = article
            .bumped_at()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| article.bump_time.to_string());
        println!("#{} {:?} (bumped {})", article.id, article.title, bumped);
    }
}
