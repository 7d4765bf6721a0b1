use crate::date::parse_datetime;
use crate::event::{EventDetails, Organizer, Recipient, DEFAULT_EVENT_DESCRIPTION};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FormNormalizationError {
    #[error("Missing form field: {0}")]
    MissingField(&'static str),
    #[error("Unable to parse event time: {0}")]
    InvalidEventTime(String),
}

const FIRST_NAME: &[&str] = &["firstname"];
const LAST_NAME: &[&str] = &["lastname"];
const FULL_NAME: &[&str] = &["name", "fullname"];
const EMAIL: &[&str] = &["email", "emailaddress"];
const EVENT_TIME: &[&str] = &["eventtime", "starttime", "eventstart"];
const EVENT_END_TIME: &[&str] = &["eventendtime", "endtime", "eventend"];
const EVENT_NAME: &[&str] = &["eventname", "summary", "event"];
const EVENT_LOCATION: &[&str] = &["eventlocation", "location"];
const DESCRIPTION: &[&str] = &["description", "eventdescription"];

/// Form fields keyed by their name lowercased and stripped of everything
/// but letters and digits, so that `E-Mail`, `email` and `Email` are equal.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, String>,
}

fn field_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

impl FormFields {
    pub fn new(data: &Map<String, Value>) -> Self {
        let fields = data
            .iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    Value::String(s) => s.trim().to_string(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((field_key(name), value))
            })
            .collect();
        Self { fields }
    }

    fn get(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.fields.get(*alias))
            .map(|value| value.as_str())
            .find(|value| !value.is_empty())
    }

    fn recipient_name(&self) -> String {
        let first_last = [self.get(FIRST_NAME), self.get(LAST_NAME)]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if !first_last.is_empty() {
            return first_last;
        }
        self.get(FULL_NAME).unwrap_or_default().to_string()
    }
}

/// Maps the fields of a web form submission to the event it describes
/// and the person who should be invited to it.
pub fn normalize_form_submission(
    fields: &FormFields,
    organizer: &Organizer,
) -> Result<(EventDetails, Recipient), FormNormalizationError> {
    let email = fields
        .get(EMAIL)
        .ok_or(FormNormalizationError::MissingField("E-Mail"))?
        .to_lowercase();
    let summary = fields
        .get(EVENT_NAME)
        .ok_or(FormNormalizationError::MissingField("eventName"))?;
    let event_time = fields
        .get(EVENT_TIME)
        .ok_or(FormNormalizationError::MissingField("Event Time"))?;
    let start_ts = parse_datetime(event_time)
        .ok_or_else(|| FormNormalizationError::InvalidEventTime(event_time.to_string()))?;
    let end_ts = match fields.get(EVENT_END_TIME) {
        Some(end_time) => parse_datetime(end_time)
            .ok_or_else(|| FormNormalizationError::InvalidEventTime(end_time.to_string()))?,
        None => start_ts,
    };

    let details = EventDetails {
        summary: summary.to_string(),
        location: fields.get(EVENT_LOCATION).unwrap_or_default().to_string(),
        description: fields
            .get(DESCRIPTION)
            .unwrap_or(DEFAULT_EVENT_DESCRIPTION)
            .to_string(),
        organizer: organizer.clone(),
        start_ts,
        end_ts,
    };
    let recipient = Recipient {
        name: fields.recipient_name(),
        email,
    };

    Ok((details, recipient))
}
