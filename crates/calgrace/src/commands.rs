//! CLI subcommands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::json;

use calgrace_core::dates::{format_display, parse_display, to_display, to_storage};
use calgrace_core::deletion::{DeletableItem, ItemKind, SignalBus};

use crate::config::Config;
use crate::deletion::GracefulDelete;
use crate::memory::{
    InMemoryBackend, MemoryGracePeriod, MemorySignalBus, RecordingNotifier, Severity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Contact,
    Event,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Contact => ItemKind::Contact,
            KindArg::Event => ItemKind::Event,
        }
    }
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Book or calendar the item belongs to
    #[arg(long)]
    pub collection: String,

    /// Identifier of the item to delete
    #[arg(long)]
    pub id: String,

    /// Display name of the item
    #[arg(long)]
    pub name: Option<String>,

    /// Kind of item
    #[arg(long, value_enum, default_value_t = KindArg::Contact)]
    pub kind: KindArg,

    /// Press "Cancel" this many milliseconds after the grace period starts
    #[arg(long)]
    pub cancel_after_ms: Option<u64>,

    /// Grace window in seconds
    #[arg(long, env = "GRACE_TIMEOUT_SECONDS")]
    pub grace_timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct AllDayArgs {
    #[command(flatten)]
    pub direction: Direction,

    /// Treat the value as belonging to a timed event (no day shift)
    #[arg(long)]
    pub timed: bool,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct Direction {
    /// Stored (exclusive) end date to show to the user
    #[arg(long, value_name = "DATE")]
    pub to_display: Option<String>,

    /// Displayed (inclusive) end date to store
    #[arg(long, value_name = "DATE")]
    pub to_storage: Option<String>,
}

/// Runs one delete against an in-memory backend seeded with the item.
pub async fn delete(args: DeleteArgs, mut config: Config) -> Result<()> {
    if let Some(seconds) = args.grace_timeout {
        config.grace_timeout_seconds = seconds;
    }

    let mut item = DeletableItem {
        id: args.id,
        display_name: None,
        collection_id: args.collection.clone(),
        kind: args.kind.into(),
    };
    if let Some(name) = args.name {
        item = item.with_display_name(name);
    }

    let notifier = RecordingNotifier::new();
    let backend = InMemoryBackend::new(config.task_ttl());
    let grace = MemoryGracePeriod::new(config.grace_timeout(), Arc::new(notifier.clone()));
    let signals = MemorySignalBus::new(config.signal_channel_capacity);

    backend.insert(item.clone()).await;
    let mut signal_rx = signals.subscribe(&item.kind.cancel_delete_topic()).await?;

    if let Some(delay) = args.cancel_after_ms {
        let grace = grace.clone();
        let mut started = grace.subscribe_started();
        tokio::spawn(async move {
            if let Ok(task_id) = started.recv().await {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                if !grace.request_cancel(&task_id).await {
                    tracing::warn!(%task_id, "Cancel pressed after grace period ended");
                }
            }
        });
    }

    let service = GracefulDelete::new(
        Arc::new(backend.clone()),
        Arc::new(grace),
        Arc::new(notifier.clone()),
        Arc::new(signals),
    );

    let result = service.request_delete(&args.collection, &item).await;

    let mut signals_received = 0;
    while signal_rx.try_recv().is_ok() {
        signals_received += 1;
    }
    let still_present = backend.contains(&item.collection_id, &item.id).await;
    let restorable = backend.pending_count().await;
    let errors = notifier.with_severity(Severity::Error).len();

    if args.json {
        let summary = json!({
            "outcome": result.as_ref().ok(),
            "error": result.as_ref().err().map(|err| err.to_string()),
            "notifications": notifier.notifications(),
            "signals": signals_received,
            "item_present": still_present,
            "restorable_tasks": restorable,
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for notification in notifier.notifications() {
            println!(
                "[{:?}] {}: {}",
                notification.severity, notification.title, notification.text
            );
        }
        match &result {
            Ok(outcome) => println!(
                "{:?} (task {}), signals: {}, item present: {}, restorable tasks: {}",
                outcome.state(),
                outcome.pending().task_id,
                signals_received,
                still_present,
                restorable
            ),
            Err(err) => println!("Failed: {err} ({errors} error notifications)"),
        }
    }

    result.map(|_| ()).map_err(Into::into)
}

/// Converts an all-day end date between its stored and displayed forms.
pub fn all_day(args: AllDayArgs) -> Result<()> {
    println!("{}", convert(&args)?);
    Ok(())
}

fn convert(args: &AllDayArgs) -> Result<String> {
    let is_all_day = !args.timed;

    let converted = match (&args.direction.to_display, &args.direction.to_storage) {
        (Some(stored), _) => to_display(parse_display(stored, is_all_day)?, is_all_day)?,
        (None, Some(displayed)) => to_storage(parse_display(displayed, is_all_day)?, is_all_day)?,
        (None, None) => anyhow::bail!("Either --to-display or --to-storage is required"),
    };

    Ok(format_display(converted))
}
