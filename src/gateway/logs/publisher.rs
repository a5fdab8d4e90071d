use std::collections::BTreeSet;
use async_trait::async_trait;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher writes events to the tracing subscriber; used with the in-memory store.
#[derive(Debug, Default)]
pub struct LogPublisher {
    topics: BTreeSet<String>,
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn create_topic(&mut self, topic: &str) -> Result<String, LibraryError> {
        self.topics.insert(topic.to_string());
        Ok(topic.to_string())
    }

    async fn get_topics(&mut self) -> Result<Vec<String>, LibraryError> {
        Ok(self.topics.iter().cloned().collect())
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let json = serde_json::to_string(event)?;
        info!(name = event.name.as_str(), key = event.key.as_str(), event = json.as_str(), "domain event");
        Ok(())
    }
}
