mod commands;
mod config;
mod deletion;
mod memory;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    commands::{AllDayArgs, DeleteArgs},
    config::Config,
};

/// calgrace - Delete contacts and events with undo, convert all-day end dates
#[derive(Parser, Debug)]
#[command(name = "calgrace")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Delete an item and offer a grace period to undo it
    Delete(DeleteArgs),

    /// Convert an all-day end date between stored and displayed form
    AllDay(AllDayArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calgrace=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Delete(args) => commands::delete(args, config).await,
        Command::AllDay(args) => commands::all_day(args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::commands::KindArg;

    #[test]
    fn test_grace_timeout_falls_back_to_env() {
        let cli = Cli::command();
        let delete = cli
            .find_subcommand("delete")
            .expect("delete subcommand");
        let grace_timeout = delete
            .get_arguments()
            .find(|arg| arg.get_id() == "grace_timeout")
            .expect("grace timeout argument");

        assert_eq!(
            grace_timeout.get_env(),
            Some(std::ffi::OsStr::new("GRACE_TIMEOUT_SECONDS"))
        );
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from([
            "calgrace",
            "delete",
            "--collection",
            "book-1",
            "--id",
            "c-1",
            "--name",
            "Jane Doe",
            "--cancel-after-ms",
            "500",
        ])
        .unwrap();

        let Command::Delete(args) = cli.command else {
            panic!("Expected delete command");
        };
        assert_eq!(args.collection, "book-1");
        assert_eq!(args.name.as_deref(), Some("Jane Doe"));
        assert_eq!(args.kind, KindArg::Contact);
        assert_eq!(args.cancel_after_ms, Some(500));
        assert!(!args.json);
    }

    #[test]
    fn test_parse_all_day_requires_one_direction() {
        assert!(Cli::try_parse_from(["calgrace", "all-day"]).is_err());
        assert!(Cli::try_parse_from([
            "calgrace",
            "all-day",
            "--to-display",
            "2015-03-01",
            "--to-storage",
            "2015-02-28",
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "calgrace",
            "all-day",
            "--to-display",
            "2015-03-01",
            "--timed",
        ])
        .unwrap();
        let Command::AllDay(args) = cli.command else {
            panic!("Expected all-day command");
        };
        assert_eq!(args.direction.to_display.as_deref(), Some("2015-03-01"));
        assert!(args.timed);
    }

    #[test]
    fn test_all_day_rejects_bad_date() {
        let cli = Cli::try_parse_from(["calgrace", "all-day", "--to-storage", "28/02/2015"])
            .unwrap();
        let Command::AllDay(args) = cli.command else {
            panic!("Expected all-day command");
        };
        assert!(commands::all_day(args).is_err());
    }
}
