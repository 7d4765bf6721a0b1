mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::EventKeyQuery;
pub use inmemory::InMemoryScheduledEventRepo;
use invite_engine_domain::{EventMerge, ScheduledEvent, ID};
pub use postgres::PostgresScheduledEventRepo;

#[async_trait::async_trait]
pub trait IScheduledEventRepo: Send + Sync {
    async fn insert(&self, e: &ScheduledEvent) -> anyhow::Result<()>;
    /// Overwrites the event fields and adds the user to `selected_users`,
    /// replacing an existing user with the same email
    async fn merge(&self, event_id: &ID, merge: &EventMerge) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<ScheduledEvent>>;
    /// Events in the order they were inserted
    async fn find_by_key(&self, query: &EventKeyQuery) -> anyhow::Result<Vec<ScheduledEvent>>;
}

#[cfg(test)]
mod tests {
    use crate::repos::shared::query_structs::EventKeyQuery;
    use crate::InviteContext;
    use invite_engine_domain::{
        EventDetails, EventMerge, EventStatus, Organizer, Recipient, ScheduledEvent,
        SelectedUser, DEFAULT_EVENT_DESCRIPTION,
    };

    fn generate_event(summary: &str, start_ts: i64) -> ScheduledEvent {
        let details = EventDetails {
            summary: summary.into(),
            location: "Library".into(),
            description: DEFAULT_EVENT_DESCRIPTION.into(),
            organizer: Organizer {
                name: "Org".into(),
                email: "org@example.com".into(),
            },
            start_ts,
            end_ts: start_ts,
        };
        let user = SelectedUser::invited(
            &Recipient {
                name: "Ada".into(),
                email: "ada@example.com".into(),
            },
            start_ts,
        );
        ScheduledEvent::new_full_day(details, vec![user], start_ts)
    }

    fn key_query(event: &ScheduledEvent) -> EventKeyQuery {
        EventKeyQuery::from(&event.key())
    }

    #[tokio::test]
    async fn insert_and_find() {
        let ctx = InviteContext::create_inmemory();
        let event = generate_event("Workshop", 0);

        assert!(ctx.repos.events.insert(&event).await.is_ok());

        let found = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query event")
            .expect("To find event");
        assert_eq!(found, event);
        assert!(ctx
            .repos
            .events
            .find(&Default::default())
            .await
            .expect("To query event")
            .is_none());
    }

    #[tokio::test]
    async fn find_by_key_ignores_day_and_other_keys() {
        let ctx = InviteContext::create_inmemory();
        let day = 1000 * 60 * 60 * 24;
        let event1 = generate_event("Workshop", 0);
        let event2 = generate_event("Workshop", 3 * day);
        let other = generate_event("Lecture", 0);
        for e in [&event1, &event2, &other] {
            ctx.repos.events.insert(e).await.expect("To insert event");
        }

        let found = ctx
            .repos
            .events
            .find_by_key(&key_query(&event1))
            .await
            .expect("To find events");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, event1.id);
        assert_eq!(found[1].id, event2.id);
    }

    #[tokio::test]
    async fn merge_overwrites_fields_and_adds_user_once() {
        let ctx = InviteContext::create_inmemory();
        let event = generate_event("Workshop", 0);
        ctx.repos.events.insert(&event).await.expect("To insert event");

        let mut merge = EventMerge {
            end_ts: 500,
            description: "Changed".into(),
            location: event.event_details.location.clone(),
            organizer: Organizer {
                name: "New name".into(),
                email: "org@example.com".into(),
            },
            selected_user: SelectedUser::invited(
                &Recipient {
                    name: "Bob".into(),
                    email: "bob@example.com".into(),
                },
                100,
            ),
            scheduled_time: 100,
            status: EventStatus::Pending,
        };
        ctx.repos
            .events
            .merge(&event.id, &merge)
            .await
            .expect("To merge event");
        merge.selected_user.last_invited_at = Some(200);
        merge.scheduled_time = 200;
        ctx.repos
            .events
            .merge(&event.id, &merge)
            .await
            .expect("To merge event");

        let found = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query event")
            .expect("To find event");
        assert_eq!(found.event_details.end_ts, 500);
        assert_eq!(found.event_details.description, "Changed");
        assert_eq!(found.event_details.organizer.name, "New name");
        assert_eq!(found.scheduled_time, 200);
        assert_eq!(found.selected_users.len(), 2);
        assert_eq!(
            found.selected_user("bob@example.com").unwrap().last_invited_at,
            Some(200)
        );
    }

    #[tokio::test]
    async fn merge_into_missing_event_fails() {
        let ctx = InviteContext::create_inmemory();
        let event = generate_event("Workshop", 0);
        let merge = EventMerge {
            end_ts: 0,
            description: "".into(),
            location: "".into(),
            organizer: event.event_details.organizer.clone(),
            selected_user: event.selected_users[0].clone(),
            scheduled_time: 0,
            status: EventStatus::Pending,
        };
        assert!(ctx.repos.events.merge(&event.id, &merge).await.is_err());
    }
}
