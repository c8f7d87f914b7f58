//! "Add to calendar" links for interaction follow-ups

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};

use crate::api::encode_query_value;
use crate::domain::Interaction;

const OUTLOOK_DURATION_MINUTES: i64 = 30;

/// Follow-up time in UTC; naive values are taken as UTC
fn follow_up_utc(interaction: &Interaction) -> Option<DateTime<Utc>> {
    let raw = interaction.follow_up.as_deref()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn google_name(interaction: &Interaction) -> &str {
    interaction
        .client_name
        .as_deref()
        .or(interaction.lead_name.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown")
}

/// Google Calendar event template; zero-length event at the follow-up time
pub fn google_calendar_url(interaction: &Interaction) -> Option<String> {
    let start = follow_up_utc(interaction)?.format("%Y%m%dT%H%M%SZ").to_string();
    let title = format!("Follow-up: {}", google_name(interaction));
    let details = format!("Notes: {}\nOutcome: {}", interaction.notes, interaction.outcome);
    Some(format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}/{}&details={}",
        encode_query_value(&title),
        start,
        start,
        encode_query_value(&details),
    ))
}

/// Outlook.com compose deep link with a 30 minute slot
pub fn outlook_calendar_url(interaction: &Interaction) -> Option<String> {
    let start = follow_up_utc(interaction)?;
    let end = start + Duration::minutes(OUTLOOK_DURATION_MINUTES);
    let subject = if interaction.summary.is_empty() { "Follow-up" } else { interaction.summary.as_str() };
    Some(format!(
        "https://outlook.live.com/calendar/0/deeplink/compose?path=/calendar/action/compose&subject={}&body={}&startdt={}&enddt={}",
        encode_query_value(subject),
        encode_query_value(&interaction.notes),
        start.to_rfc3339_opts(SecondsFormat::Millis, true),
        end.to_rfc3339_opts(SecondsFormat::Millis, true),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(follow_up: Option<&str>) -> Interaction {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "contact_date": "2024-03-01T10:00:00Z",
            "summary": "Pricing call",
            "outcome": "Wants quote",
            "notes": "Send PDF & terms",
            "client_name": "Acme Co",
            "follow_up": follow_up,
        }))
        .unwrap()
    }

    #[test]
    fn test_google_url() {
        let url = google_calendar_url(&interaction(Some("2024-03-08T09:30:00Z"))).unwrap();
        assert_eq!(
            url,
            "https://calendar.google.com/calendar/render?action=TEMPLATE&text=Follow-up%3A%20Acme%20Co\
             &dates=20240308T093000Z/20240308T093000Z\
             &details=Notes%3A%20Send%20PDF%20%26%20terms%0AOutcome%3A%20Wants%20quote"
        );
    }

    #[test]
    fn test_outlook_adds_thirty_minutes() {
        let url = outlook_calendar_url(&interaction(Some("2024-03-08T09:30:00+01:00"))).unwrap();
        assert!(url.contains("subject=Pricing%20call"));
        assert!(url.contains("&startdt=2024-03-08T08:30:00.000Z&enddt=2024-03-08T09:00:00.000Z"));
    }

    #[test]
    fn test_no_follow_up_no_link() {
        assert!(google_calendar_url(&interaction(None)).is_none());
        assert!(outlook_calendar_url(&interaction(Some("soon"))).is_none());
    }
}
