use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Duration;
use tracing::{info, warn};
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;
use crate::instances::dto::BookInstanceDto;
use crate::instances::repository::BookInstanceRepository;
use crate::renewals::domain::{RedirectTarget, RenewalService, RenewalState};
use crate::renewals::forms::{RENEWAL_HELP_TEXT, RenewalInput};
use crate::utils::date::DAY_FMT;

pub(crate) struct RenewalServiceImpl {
    renewal_horizon_days: i64,
    default_renewal_days: i64,
    instance_repository: Box<dyn BookInstanceRepository>,
    events_publisher: Box<dyn EventPublisher>,
    clock: Box<dyn Clock>,
}

impl RenewalServiceImpl {
    pub(crate) fn new(config: &Configuration, instance_repository: Box<dyn BookInstanceRepository>,
                      events_publisher: Box<dyn EventPublisher>, clock: Box<dyn Clock>) -> Self {
        Self {
            renewal_horizon_days: config.renewal_horizon_days,
            default_renewal_days: config.default_renewal_days,
            instance_repository,
            events_publisher,
            clock,
        }
    }

    // the new due date is already stored, so a lost event must not fail the renewal
    async fn publish_renewed(&self, instance_id: &str, metadata: &HashMap<String, String>, dto: &BookInstanceDto) {
        let published = match DomainEvent::renewed("book_renewed", "loans", instance_id, metadata, dto) {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(err.into()),
        };
        if let Err(err) = published {
            warn!(instance_id, error = %err, "book_renewed event not published");
        }
    }
}

#[async_trait]
impl RenewalService for RenewalServiceImpl {
    async fn begin(&self, instance_id: &str) -> LibraryResult<RenewalState> {
        let instance = self.instance_repository.get(instance_id).await?;
        let today = self.clock.today();
        Ok(RenewalState::AwaitingInput {
            instance_id: instance.instance_id,
            proposed_date: today + Duration::days(self.default_renewal_days),
            help_text: RENEWAL_HELP_TEXT.to_string(),
        })
    }

    async fn submit(&self, instance_id: &str, input: &dyn RenewalInput) -> LibraryResult<RenewalState> {
        let today = self.clock.today();
        let mut instance = self.instance_repository.get(instance_id).await?;
        let renewal_date = match input.clean_within(today, self.renewal_horizon_days) {
            Ok(date) => date,
            Err(error) => {
                warn!(instance_id, code = error.code.as_str(), "renewal rejected");
                return Ok(RenewalState::Submitted {
                    instance_id: instance.instance_id,
                    proposed_date: input.proposed_date(),
                    error,
                });
            }
        };

        instance.set_due_back(Some(renewal_date));
        let _ = self.instance_repository.update(&instance).await?;
        instance.version += 1;
        let dto = BookInstanceDto::from(&instance);
        let metadata = HashMap::from([
            ("renewed_on".to_string(), today.format(DAY_FMT).to_string()),
        ]);
        self.publish_renewed(instance_id, &metadata, &dto).await;
        info!(instance_id, due_back = %renewal_date, "book renewed");
        Ok(RenewalState::Completed {
            instance: dto,
            redirect: RedirectTarget::AllBorrowed,
        })
    }
}
