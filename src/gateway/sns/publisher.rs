use std::collections::HashMap;
use aws_sdk_sns::Client;
use async_trait::async_trait;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::create_topic::CreateTopicError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use aws_sdk_sns::types::MessageAttributeValue;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// SNSPublisher sends each event to the topic created for its name, falling back
// to the configured catch-all topic. The event group and kind travel as message
// attributes so loan and catalog subscribers can filter on them.
#[derive(Debug)]
pub struct SNSPublisher {
    client: Client,
    default_topic: Option<String>,
    topics: HashMap<String, String>,
}

impl SNSPublisher {
    pub(crate) fn new(client: Client, default_topic: Option<String>) -> Self {
        Self {
            client,
            default_topic,
            topics: HashMap::new(),
        }
    }

    fn topic_for(&self, name: &str) -> Option<&String> {
        self.topics.get(name).or(self.default_topic.as_ref())
    }
}

#[async_trait]
impl EventPublisher for SNSPublisher {
    async fn create_topic(&mut self, topic: &str) -> Result<String, LibraryError> {
        let resp = self.client.create_topic().name(topic).send().await?;
        let arn = resp.topic_arn().unwrap_or_default();
        self.topics.insert(topic.to_string(), arn.to_string());
        info!("Created topic with ARN: {}", arn);
        Ok(arn.to_string())
    }

    async fn get_topics(&mut self) -> Result<Vec<String>, LibraryError> {
        let mut topics = vec![];
        let resp = self.client.list_topics().send().await?;
        for topic in resp.topics().unwrap_or_default() {
            topics.push(topic.topic_arn().unwrap_or_default().to_string());
        }
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let arn = self.topic_for(event.name.as_str()).ok_or_else(||
            LibraryError::runtime(format!("topic is not found {}", event.name).as_str(), None))?;
        let json = serde_json::to_string(event)?;
        self.client.publish()
            .topic_arn(arn)
            .message(json)
            .message_attributes("group", string_attribute(event.group.as_str()))
            .message_attributes("kind", string_attribute(format!("{:?}", event.kind).as_str()))
            .send().await?;
        Ok(())
    }
}

fn string_attribute(value: &str) -> MessageAttributeValue {
    MessageAttributeValue::builder().data_type("String").string_value(value).build()
}

// timeouts and dispatch failures are worth retrying
fn sns_error<E: std::fmt::Debug>(err: SdkError<E>) -> LibraryError {
    let retryable = matches!(err, SdkError::TimeoutError(_) | SdkError::DispatchFailure(_));
    if retryable {
        LibraryError::unavailable(format!("{:?}", err).as_str(), Some("sns".to_string()), true)
    } else {
        LibraryError::runtime(format!("{:?}", err).as_str(), Some("sns".to_string()))
    }
}

impl From<SdkError<CreateTopicError>> for LibraryError {
    fn from(err: SdkError<CreateTopicError>) -> Self {
        sns_error(err)
    }
}

impl From<SdkError<ListTopicsError>> for LibraryError {
    fn from(err: SdkError<ListTopicsError>) -> Self {
        sns_error(err)
    }
}

impl From<SdkError<PublishError>> for LibraryError {
    fn from(err: SdkError<PublishError>) -> Self {
        sns_error(err)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::{factory, GatewayPublisherVia};

    #[tokio::test]
    #[ignore = "requires AWS credentials with SNS access"]
    async fn test_should_publish_to_sns() {
        let event = DomainEvent::renewed("book_renewed", "loans", "instance-1", &HashMap::new(), &"2024-01-29").expect("build event");
        let mut publisher = factory::create_publisher(GatewayPublisherVia::Sns).await;
        let arn = publisher.create_topic(event.name.as_str()).await.expect("should create topic");
        publisher.publish(&event).await.expect("should publish");
        let topics = publisher.get_topics().await.expect("should get topics");
        assert!(topics.contains(&arn));
    }
}
