//! Channel-backed event bus.
//!
//! Publishing pushes onto a single unbounded channel; a background task fans
//! each event out to the subscribers registered for its topic. Subscribers
//! that dropped their receiver are pruned on the next delivery.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use super::{EventBus, EventSubscription, EventTopic, PipelineEvent};
use crate::error::{PipelineError, PipelineResult};

type SubscriberMap = HashMap<String, Vec<mpsc::UnboundedSender<PipelineEvent>>>;

pub struct ChannelEventBus {
    sender: mpsc::UnboundedSender<PipelineEvent>,
    subscribers: Arc<RwLock<SubscriberMap>>,
    started: Arc<RwLock<bool>>,
}

impl ChannelEventBus {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<PipelineEvent>();
        let subscribers: Arc<RwLock<SubscriberMap>> = Arc::new(RwLock::new(HashMap::new()));

        let dispatch_subscribers = Arc::clone(&subscribers);
        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                let topic = event.topic.0.clone();
                let mut subs = dispatch_subscribers.write().await;
                if let Some(list) = subs.get_mut(&topic) {
                    list.retain(|sub| sub.send(event.clone()).is_ok());
                    if list.is_empty() {
                        subs.remove(&topic);
                    }
                }
            }
        });

        Self {
            sender,
            subscribers,
            started: Arc::new(RwLock::new(false)),
        }
    }

    /// Register a subscriber for `topic` and return its receiving end.
    ///
    /// Registration completes before this returns, so events published
    /// afterwards are guaranteed to be delivered.
    pub async fn subscribe_receiver(
        &self,
        topic: EventTopic,
    ) -> mpsc::UnboundedReceiver<PipelineEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subs = self.subscribers.write().await;
        subs.entry(topic.0).or_default().push(tx);
        rx
    }
}

impl Default for ChannelEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for ChannelEventBus {
    async fn start(&self) -> PipelineResult<()> {
        *self.started.write().await = true;
        Ok(())
    }

    async fn stop(&self) -> PipelineResult<()> {
        *self.started.write().await = false;
        Ok(())
    }

    async fn publish(&self, event: PipelineEvent) -> PipelineResult<()> {
        self.sender
            .send(event)
            .map_err(|e| PipelineError::internal(format!("failed to publish event: {}", e)))?;
        Ok(())
    }

    async fn subscribe(&self, topic: EventTopic) -> PipelineResult<EventSubscription> {
        Ok(EventSubscription { topic })
    }
}
