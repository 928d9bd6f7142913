//! Product search: the `?search=` URL parameter and input debouncing.
//!
//! The URL is the source of truth for the committed search. Keystrokes go
//! through a [`Debouncer`] so only the last value in a burst hits the API.

use chrono::{DateTime, Duration, Utc};

pub const SEARCH_PARAM: &str = "search";

/// Committed search term from a query string such as `?search=raw+honey&page=2`.
pub fn search_term(query_string: &str) -> Option<String> {
    query_string
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == SEARCH_PARAM)
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.trim().to_string())
        })
        .filter(|term| !term.is_empty())
}

/// Trailing-edge debounce driven by explicit instants.
///
/// Every `push` restarts the wait; `poll` hands out the latest value once the
/// wait has elapsed with no newer push.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, DateTime<Utc>)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait: Duration::milliseconds(i64::from(wait_ms)),
            pending: None,
        }
    }

    /// Record `value` and return the instant it becomes due.
    pub fn push(&mut self, value: T, now: DateTime<Utc>) -> DateTime<Utc> {
        let due = now + self.wait;
        self.pending = Some((value, due));
        due
    }

    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<T> {
        let due = matches!(&self.pending, Some((_, due)) if now >= *due);
        if due {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ms(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).single().expect("valid timestamp")
    }

    #[test]
    fn test_search_term_from_query_string() {
        assert_eq!(search_term("?search=kale"), Some("kale".to_string()));
        assert_eq!(search_term("page=2&search=raw+honey"), Some("raw honey".to_string()));
        assert_eq!(search_term("search=caf%C3%A9"), Some("café".to_string()));
        assert_eq!(search_term("?search="), None);
        assert_eq!(search_term("?search"), None);
        assert_eq!(search_term("?q=kale"), None);
        assert_eq!(search_term(""), None);
    }

    #[test]
    fn test_latest_value_wins_after_quiet_period() {
        let mut debouncer = Debouncer::new(400);
        debouncer.push("k", ms(0));
        debouncer.push("ka", ms(100));
        let due = debouncer.push("kale", ms(250));
        assert_eq!(due, ms(650));

        assert_eq!(debouncer.poll(ms(400)), None);
        assert_eq!(debouncer.poll(ms(649)), None);
        assert_eq!(debouncer.poll(ms(650)), Some("kale"));
        assert_eq!(debouncer.poll(ms(2000)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        let mut debouncer = Debouncer::new(400);
        debouncer.push("kale", ms(0));
        debouncer.cancel();
        assert_eq!(debouncer.poll(ms(1000)), None);
    }
}
