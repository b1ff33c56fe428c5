use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Backend, Config};

/// Drop, recreate and seed the article database.
///
/// WARNING: `reset` (the default) permanently deletes every article, media
/// entry, comment and admin in the target database.
#[derive(Debug, Parser)]
#[command(name = "reset-db", version)]
pub struct Cli {
    /// Config file to read instead of the per-user default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// SQLite database file; implies `--backend sqlite` unless one is given
    #[arg(long, global = true)]
    pub sqlite_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Drop all four tables, recreate them and insert the sample rows
    Reset,
    /// Show row counts for each table
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Check a password read from stdin against the stored admin hash
    CheckAdmin {
        #[arg(long, default_value = "admin")]
        username: String,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Reset)
    }

    /// Flags win over the config file and environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.sqlite_path {
            config.sqlite.path = path.clone();
            config.backend = Backend::Sqlite;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_reset() {
        let cli = Cli::try_parse_from(["reset-db"]).unwrap();
        assert_eq!(cli.command(), Command::Reset);
    }

    #[test]
    fn sqlite_path_switches_backend() {
        let cli = Cli::try_parse_from(["reset-db", "--sqlite-path", "/tmp/a.db", "status", "--json"])
            .unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.sqlite.path, "/tmp/a.db");
        assert_eq!(cli.command(), Command::Status { json: true });
    }

    #[test]
    fn explicit_backend_wins() {
        let cli = Cli::try_parse_from([
            "reset-db",
            "--sqlite-path",
            "/tmp/a.db",
            "--backend",
            "postgres",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.backend, Backend::Postgres);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["reset-db", "--backend", "mysql"]).is_err());
    }
}
