use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A poll record as persisted under `ops_polls`.
///
/// Field names follow the persisted JSON format (`createdAt`, `expiresAt`).
/// Invariant: every key in `votes` is a declared option label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub votes: HashMap<String, u64>,
}

impl Poll {
    /// Build a poll with a time-derived id and zero-initialized vote counts
    /// for every declared option.
    pub fn new(question: &str, options: &[String], expiry_days: Option<i64>) -> Self {
        let created_at = Utc::now();
        let votes = options.iter().map(|opt| (opt.clone(), 0)).collect();

        Self {
            id: format!("poll_{}", created_at.timestamp_millis()),
            question: question.to_string(),
            options: options.to_vec(),
            created_at,
            expires_at: expiry_days.map(|days| created_at + Duration::days(days)),
            votes,
        }
    }

    /// Whether the poll's expiry has passed. Display-only status: expiry is
    /// recorded at creation and never enforced on votes.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(opts: &[&str]) -> Vec<String> {
        opts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_poll_zero_initializes_every_option() {
        let poll = Poll::new("Lunch?", &labels(&["pizza", "sushi"]), None);

        assert_eq!(poll.options, vec!["pizza", "sushi"]);
        assert_eq!(poll.votes.get("pizza"), Some(&0));
        assert_eq!(poll.votes.get("sushi"), Some(&0));
        assert_eq!(poll.votes.len(), 2);
        assert!(poll.expires_at.is_none());
        assert!(poll.id.starts_with("poll_"));
    }

    #[test]
    fn expiry_days_sets_expires_at() {
        let poll = Poll::new("Q", &labels(&["a"]), Some(7));
        let expires = poll.expires_at.expect("expiry set");
        assert_eq!(expires - poll.created_at, Duration::days(7));

        assert!(!poll.is_expired(poll.created_at));
        assert!(poll.is_expired(poll.created_at + Duration::days(8)));
    }

    #[test]
    fn serializes_with_camel_case_timestamps() {
        let poll = Poll::new("Q", &labels(&["a"]), Some(1));
        let json = serde_json::to_string(&poll).unwrap();

        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"expiresAt\""));
        assert!(json.contains("\"votes\""));

        let back: Poll = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, poll.id);
        assert_eq!(back.expires_at, poll.expires_at);
    }
}
