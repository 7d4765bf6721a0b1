use crate::date::{end_of_utc_day, is_same_utc_day, start_of_utc_day};
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_EVENT_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

/// What the event is about. Submissions describe an event with these
/// fields and the stored `ScheduledEvent` keeps the latest version of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub organizer: Organizer,
    pub start_ts: i64,
    pub end_ts: i64,
}

/// The person a submission asks to invite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedUser {
    pub name: String,
    pub email: String,
    /// When the last invite to this user was attempted. This is set before
    /// the email is sent and is therefore only a cache of the invite ledger.
    pub last_invited_at: Option<i64>,
}

impl SelectedUser {
    pub fn invited(recipient: &Recipient, invited_at: i64) -> Self {
        Self {
            name: recipient.name.clone(),
            email: recipient.email.clone(),
            last_invited_at: Some(invited_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::Error::msg(format!("Unknown event status: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: ID,
    pub event_details: EventDetails,
    pub selected_users: Vec<SelectedUser>,
    pub status: EventStatus,
    /// Timestamp of the last reconciliation that wrote this event
    pub scheduled_time: i64,
}

impl Entity for ScheduledEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Identifies one logical event: same summary, location and organizer
/// on the same UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub summary: String,
    pub location: String,
    pub organizer_email: String,
    pub day: i64,
}

impl EventKey {
    pub fn new(details: &EventDetails) -> Self {
        Self {
            summary: details.summary.clone(),
            location: details.location.clone(),
            organizer_email: details.organizer.email.clone(),
            day: start_of_utc_day(details.start_ts),
        }
    }

    pub fn matches(&self, event: &ScheduledEvent) -> bool {
        let details = &event.event_details;
        details.summary == self.summary
            && details.location == self.location
            && details.organizer.email == self.organizer_email
            && is_same_utc_day(details.start_ts, self.day)
    }
}

/// Changes applied to an existing `ScheduledEvent` when a new submission
/// matches it. Fields are overwritten, the user is added by email.
#[derive(Debug, Clone)]
pub struct EventMerge {
    pub end_ts: i64,
    pub description: String,
    pub location: String,
    pub organizer: Organizer,
    pub selected_user: SelectedUser,
    pub scheduled_time: i64,
    pub status: EventStatus,
}

impl ScheduledEvent {
    /// Creates an event spanning the whole UTC day of `details.start_ts`,
    /// regardless of the end time given in `details`.
    pub fn new_full_day(
        mut details: EventDetails,
        selected_users: Vec<SelectedUser>,
        scheduled_time: i64,
    ) -> Self {
        details.end_ts = end_of_utc_day(details.start_ts);
        details.start_ts = start_of_utc_day(details.start_ts);
        Self {
            id: Default::default(),
            event_details: details,
            selected_users,
            status: EventStatus::Pending,
            scheduled_time,
        }
    }

    pub fn key(&self) -> EventKey {
        EventKey::new(&self.event_details)
    }

    pub fn selected_user(&self, email: &str) -> Option<&SelectedUser> {
        self.selected_users.iter().find(|u| u.email == email)
    }

    /// Whether `email` was invited less than `cooldown` millis before `now`
    pub fn was_recently_invited(&self, email: &str, now: i64, cooldown: i64) -> bool {
        match self.selected_user(email).and_then(|u| u.last_invited_at) {
            Some(last_invited_at) => now - last_invited_at < cooldown,
            None => false,
        }
    }

    pub fn apply_merge(&mut self, merge: &EventMerge) {
        self.event_details.end_ts = merge.end_ts;
        self.event_details.description = merge.description.clone();
        self.event_details.location = merge.location.clone();
        self.event_details.organizer = merge.organizer.clone();
        self.scheduled_time = merge.scheduled_time;
        self.status = merge.status;

        match self
            .selected_users
            .iter_mut()
            .find(|u| u.email == merge.selected_user.email)
        {
            Some(existing) => {
                existing.name = merge.selected_user.name.clone();
                existing.last_invited_at = merge.selected_user.last_invited_at;
            }
            None => self.selected_users.push(merge.selected_user.clone()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::prelude::*;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn details(start_ts: i64) -> EventDetails {
        EventDetails {
            summary: "Kilmer Branch Library".into(),
            location: "101 Melody Ln, Fort Pierce, Florida 34950".into(),
            description: DEFAULT_EVENT_DESCRIPTION.into(),
            organizer: Organizer {
                name: "Showcase".into(),
                email: "support@showcase.education".into(),
            },
            start_ts,
            end_ts: start_ts + 1000 * 60 * 60,
        }
    }

    fn recipient(email: &str) -> Recipient {
        Recipient {
            name: "James Redd".into(),
            email: email.into(),
        }
    }

    fn merge_for(event: &ScheduledEvent, user: SelectedUser, now: i64) -> EventMerge {
        EventMerge {
            end_ts: event.event_details.end_ts,
            description: "Updated".into(),
            location: event.event_details.location.clone(),
            organizer: event.event_details.organizer.clone(),
            selected_user: user,
            scheduled_time: now,
            status: EventStatus::Pending,
        }
    }

    #[test]
    fn new_events_span_the_full_utc_day() {
        let event = ScheduledEvent::new_full_day(details(ts(2025, 7, 30, 15)), vec![], 0);
        assert_eq!(event.event_details.start_ts, ts(2025, 7, 30, 0));
        assert_eq!(event.event_details.end_ts, ts(2025, 7, 31, 0) - 1);
        assert_eq!(event.status, EventStatus::Pending);
    }

    #[test]
    fn key_matches_same_day_only() {
        let event = ScheduledEvent::new_full_day(details(ts(2025, 7, 30, 15)), vec![], 0);
        assert!(EventKey::new(&details(ts(2025, 7, 30, 9))).matches(&event));
        assert!(!EventKey::new(&details(ts(2025, 7, 31, 9))).matches(&event));

        let mut other_location = details(ts(2025, 7, 30, 9));
        other_location.location = "Elsewhere".into();
        assert!(!EventKey::new(&other_location).matches(&event));
    }

    #[test]
    fn recent_invite_check_is_strict() {
        let now = ts(2025, 7, 30, 12);
        let cooldown = 1000 * 60 * 2;
        let event = ScheduledEvent::new_full_day(
            details(now),
            vec![SelectedUser::invited(&recipient("a@x.com"), now - cooldown)],
            now,
        );
        assert!(!event.was_recently_invited("a@x.com", now, cooldown));
        assert!(event.was_recently_invited("a@x.com", now - 1, cooldown));
        assert!(!event.was_recently_invited("b@x.com", now, cooldown));
    }

    #[test]
    fn merge_adds_users_by_email_only_once() {
        let now = ts(2025, 7, 30, 12);
        let mut event = ScheduledEvent::new_full_day(
            details(now),
            vec![SelectedUser::invited(&recipient("a@x.com"), now)],
            now,
        );

        let merge = merge_for(&event, SelectedUser::invited(&recipient("b@x.com"), now + 1), now + 1);
        event.apply_merge(&merge);
        assert_eq!(event.selected_users.len(), 2);
        assert_eq!(event.event_details.description, "Updated");

        let merge = merge_for(&event, SelectedUser::invited(&recipient("a@x.com"), now + 2), now + 2);
        event.apply_merge(&merge);
        assert_eq!(event.selected_users.len(), 2);
        assert_eq!(
            event.selected_user("a@x.com").unwrap().last_invited_at,
            Some(now + 2)
        );
        assert_eq!(event.scheduled_time, now + 2);
    }

    #[test]
    fn parses_status() {
        for status in [EventStatus::Pending, EventStatus::Confirmed, EventStatus::Cancelled] {
            assert_eq!(status.as_str().parse::<EventStatus>().unwrap(), status);
        }
        assert!("done".parse::<EventStatus>().is_err());
    }
}
