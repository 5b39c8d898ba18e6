//! In-memory signal bus.
//!
//! Fans delete signals out to subscribers using tokio broadcast channels,
//! one channel per topic.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use calgrace_core::deletion::{DeleteSignal, Result, SignalBus};

/// In-memory signal bus.
#[derive(Debug, Clone)]
pub struct MemorySignalBus {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<DeleteSignal>>>>,
    capacity: usize,
}

impl MemorySignalBus {
    /// Creates a new bus whose channels hold up to `capacity` signals.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Gets or creates the channel for the given topic.
    async fn get_or_create_channel(&self, topic: &str) -> broadcast::Sender<DeleteSignal> {
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(topic) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;

        // Double-check after acquiring write lock
        if let Some(sender) = channels.get(topic) {
            return sender.clone();
        }

        let (sender, _) = broadcast::channel(self.capacity);
        channels.insert(topic.to_string(), sender.clone());
        sender
    }
}

#[async_trait]
impl SignalBus for MemorySignalBus {
    async fn publish(&self, signal: DeleteSignal) -> Result<()> {
        let sender = self.get_or_create_channel(&signal.topic).await;
        let topic = signal.topic.clone();

        // No receivers just means nobody is watching this topic.
        let receivers = sender.send(signal).unwrap_or(0);
        tracing::debug!(%topic, receivers, "Signal published");

        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<DeleteSignal>> {
        let sender = self.get_or_create_channel(topic).await;
        Ok(sender.subscribe())
    }
}
