use chrono::prelude::*;
use chrono_tz::{America::New_York, Tz};
use icalendar::{Calendar, Component, Property};
use invite_engine_domain::{EventDetails, Recipient};

const PRODUCT_ID: &str = "-//Stagholme//Event Invitations//EN";
const FALLBACK_SUMMARY: &str = "Untitled Event";
const FALLBACK_ORGANIZER_NAME: &str = "Event Organizer";

/// Builds the calendar attachment sent with an invite email
pub trait IInvitePayloadBuilder: Send + Sync {
    fn build(&self, details: &EventDetails, recipient: &Recipient, now: i64) -> String;
}

/// Builds `METHOD:REQUEST` iCalendar invites with start and end expressed
/// as wall time in America/New_York.
pub struct IcsInviteBuilder {
    domain: String,
    timezone: Tz,
}

impl IcsInviteBuilder {
    pub fn new(domain: String) -> Self {
        Self {
            domain,
            timezone: New_York,
        }
    }

    fn utc_datetime(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ts).single().unwrap_or_default()
    }

    fn local_datetime_property(&self, name: &str, ts: i64) -> Property {
        let local = Self::utc_datetime(ts)
            .with_timezone(&self.timezone)
            .format("%Y%m%dT%H%M%S")
            .to_string();
        let mut prop = Property::new(name, local);
        prop.add_parameter("TZID", self.timezone.name());
        prop
    }
}

fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

impl IInvitePayloadBuilder for IcsInviteBuilder {
    fn build(&self, details: &EventDetails, recipient: &Recipient, now: i64) -> String {
        let mut cal = Calendar::new();

        let mut invite = icalendar::Event::new();
        invite.uid(&format!("{}@{}", uuid::Uuid::new_v4(), self.domain));
        invite.add_property(
            "DTSTAMP",
            Self::utc_datetime(now).format("%Y%m%dT%H%M%SZ").to_string(),
        );
        invite.append_property(self.local_datetime_property("DTSTART", details.start_ts));
        invite.append_property(self.local_datetime_property("DTEND", details.end_ts));
        invite.add_property("SUMMARY", non_blank(&details.summary, FALLBACK_SUMMARY));
        invite.add_property("DESCRIPTION", &details.description);
        invite.add_property("LOCATION", &details.location);

        let mut organizer = Property::new(
            "ORGANIZER",
            format!("mailto:{}", details.organizer.email),
        );
        organizer.add_parameter(
            "CN",
            non_blank(&details.organizer.name, FALLBACK_ORGANIZER_NAME),
        );
        invite.append_property(organizer);

        let mut attendee = Property::new("ATTENDEE", format!("mailto:{}", recipient.email));
        attendee.add_parameter("ROLE", "REQ-PARTICIPANT");
        attendee.add_parameter("PARTSTAT", "NEEDS-ACTION");
        attendee.add_parameter("RSVP", "TRUE");
        attendee.add_parameter("CN", non_blank(&recipient.name, &recipient.email));
        invite.append_multi_property(attendee);

        invite.add_property("SEQUENCE", "0");
        invite.add_property("STATUS", "CONFIRMED");
        invite.add_property("TRANSP", "OPAQUE");

        cal.push(invite.done());
        let cal = cal.done();

        with_request_method(&cal.to_string())
    }
}

/// Sets our own PRODID and marks the calendar as a scheduling request
fn with_request_method(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 64);
    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODUCT_ID);
            result.push_str("\r\n");
            result.push_str("METHOD:REQUEST\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" || line.starts_with("METHOD:") {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use invite_engine_domain::Organizer;

    fn details() -> EventDetails {
        EventDetails {
            summary: "Tasting Evening".into(),
            location: "Main Hall".into(),
            description: "Bring a friend".into(),
            organizer: Organizer {
                name: "Stagholme".into(),
                email: "events@stagholme.com".into(),
            },
            // 2025-07-30T00:00:00Z and 2025-07-30T23:59:59.999Z
            start_ts: 1753833600000,
            end_ts: 1753919999999,
        }
    }

    fn recipient() -> Recipient {
        Recipient {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    fn unfold(ics: &str) -> String {
        ics.replace("\r\n ", "")
    }

    #[test]
    fn it_builds_a_request_invite() {
        let builder = IcsInviteBuilder::new("stagholme.com".into());
        // 2025-07-29T12:00:00Z
        let ics = unfold(&builder.build(&details(), &recipient(), 1753790400000));

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("METHOD:REQUEST\r\n"));
        assert!(ics.contains(&format!("PRODID:{}\r\n", PRODUCT_ID)));
        assert!(ics.contains("DTSTAMP:20250729T120000Z\r\n"));
        assert!(ics.contains("DTSTART;TZID=America/New_York:20250729T200000\r\n"));
        assert!(ics.contains("DTEND;TZID=America/New_York:20250730T195959\r\n"));
        assert!(ics.contains("SUMMARY:Tasting Evening\r\n"));
        assert!(ics.contains("LOCATION:Main Hall\r\n"));
        assert!(ics.contains("SEQUENCE:0\r\n"));
        assert!(ics.contains("STATUS:CONFIRMED\r\n"));
        assert!(ics.contains("TRANSP:OPAQUE\r\n"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));

        let attendee = ics
            .lines()
            .find(|line| line.starts_with("ATTENDEE"))
            .expect("Attendee to be present");
        assert!(attendee.ends_with(":mailto:ada@example.com"));
        assert!(attendee.contains("ROLE=REQ-PARTICIPANT"));
        assert!(attendee.contains("PARTSTAT=NEEDS-ACTION"));
        assert!(attendee.contains("RSVP=TRUE"));
        assert!(attendee.contains("CN=Ada"));

        let uid = ics
            .lines()
            .find(|line| line.starts_with("UID:"))
            .expect("UID to be present");
        assert!(uid.ends_with("@stagholme.com"));
    }

    #[test]
    fn it_falls_back_on_blank_summary_and_organizer() {
        let builder = IcsInviteBuilder::new("stagholme.com".into());
        let mut details = details();
        details.summary = "  ".into();
        details.organizer.name = "".into();
        let ics = unfold(&builder.build(&details, &recipient(), 1753790400000));

        assert!(ics.contains("SUMMARY:Untitled Event\r\n"));
        let organizer = ics
            .lines()
            .find(|line| line.starts_with("ORGANIZER"))
            .expect("Organizer to be present");
        assert!(organizer.contains("CN=Event Organizer"));
        assert!(organizer.ends_with(":mailto:events@stagholme.com"));
    }

    #[test]
    fn it_generates_unique_uids() {
        let builder = IcsInviteBuilder::new("stagholme.com".into());
        let uid = |ics: String| {
            unfold(&ics)
                .lines()
                .find(|line| line.starts_with("UID:"))
                .map(|line| line.to_string())
        };
        let first = uid(builder.build(&details(), &recipient(), 0));
        let second = uid(builder.build(&details(), &recipient(), 0));
        assert!(first.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn it_is_deterministic_apart_from_uid_and_dtstamp() {
        let builder = IcsInviteBuilder::new("stagholme.com".into());
        // Parameter order within a line is not significant
        let strip = |ics: String| {
            unfold(&ics)
                .lines()
                .filter(|line| !line.starts_with("UID:") && !line.starts_with("DTSTAMP:"))
                .map(|line| {
                    let (head, value) = line.split_once(':').unwrap_or((line, ""));
                    let mut head = head.split(';').collect::<Vec<_>>();
                    head.sort();
                    format!("{}:{}", head.join(";"), value)
                })
                .collect::<Vec<_>>()
        };
        let first = strip(builder.build(&details(), &recipient(), 0));
        let second = strip(builder.build(&details(), &recipient(), 1753790400000));
        assert_eq!(first, second);
    }
}
