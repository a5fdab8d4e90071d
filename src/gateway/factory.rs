use tracing::warn;
use crate::core::repository::RepositoryStore;
use crate::gateway::ddb::publisher::DDBPublisher;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogPublisher;
use crate::gateway::sns::publisher::SNSPublisher;
use crate::utils::ddb::{build_db_client, build_sns_client, create_table, TableIndex};

pub(crate) const EVENTS_TABLE: &str = "events";

pub(crate) async fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns => {
            let client = build_sns_client().await;
            let default_topic = std::env::var("LMS_EVENTS_TOPIC_ARN").ok();
            if default_topic.is_none() {
                warn!("LMS_EVENTS_TOPIC_ARN is not set, events without their own topic will not be published");
            }
            Box::new(SNSPublisher::new(client, default_topic))
        }
        GatewayPublisherVia::LocalDynamoDB => {
            let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
            let _ = create_table(&client, EVENTS_TABLE, "event_id", &[
                TableIndex { name: "events_ndx", hash_key: "group", range_key: "key" },
            ]).await;
            Box::new(DDBPublisher::new(client, EVENTS_TABLE))
        }
        GatewayPublisherVia::Logs => {
            Box::new(LogPublisher::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_create_log_publisher() {
        let mut publisher = create_publisher(GatewayPublisherVia::Logs).await;
        let topic = publisher.create_topic("book_renewed").await.expect("should create topic");
        let event = DomainEvent::renewed("book_renewed", "loans", "i-1", &HashMap::new(), &"2024-01-29").expect("build event");
        publisher.publish(&event).await.expect("should publish");
        assert_eq!(vec![topic], publisher.get_topics().await.expect("should list topics"));
    }
}
