use super::IScheduledEventRepo;
use crate::repos::shared::{inmemory_repo::*, query_structs::EventKeyQuery};
use invite_engine_domain::{EventMerge, ScheduledEvent, ID};

pub struct InMemoryScheduledEventRepo {
    scheduled_events: std::sync::Mutex<Vec<ScheduledEvent>>,
}

impl InMemoryScheduledEventRepo {
    pub fn new() -> Self {
        Self {
            scheduled_events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledEventRepo for InMemoryScheduledEventRepo {
    async fn insert(&self, e: &ScheduledEvent) -> anyhow::Result<()> {
        insert(e, &self.scheduled_events);
        Ok(())
    }

    async fn merge(&self, event_id: &ID, merge: &EventMerge) -> anyhow::Result<()> {
        if update(event_id, &self.scheduled_events, |e| e.apply_merge(merge)) {
            Ok(())
        } else {
            Err(anyhow::Error::msg(format!(
                "Scheduled event with id: {} was not found",
                event_id
            )))
        }
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<ScheduledEvent>> {
        Ok(find(event_id, &self.scheduled_events))
    }

    async fn find_by_key(&self, query: &EventKeyQuery) -> anyhow::Result<Vec<ScheduledEvent>> {
        let res = find_by(&self.scheduled_events, |e| {
            let details = &e.event_details;
            details.summary == query.summary
                && details.location == query.location
                && details.organizer.email == query.organizer_email
        });
        Ok(res)
    }
}
