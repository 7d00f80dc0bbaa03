//! Observability events for forumd
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in forumd
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Fixture records applied to the store
    FixturesLoaded,
    /// Server bound and serving
    ServerStart,
    /// Server failed to start (FATAL)
    ServerFailed,

    // Posts
    /// A batch of posts was committed
    PostsCreated,
    /// A post message changed
    PostUpdated,
    /// A thread listing was served
    ThreadPostsListed,

    // Requests
    /// A request failed and was mapped to an error status
    RequestFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::FixturesLoaded => "FIXTURES_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::ServerFailed => "SERVER_FAILED",
            Event::PostsCreated => "POSTS_CREATED",
            Event::PostUpdated => "POST_UPDATED",
            Event::ThreadPostsListed => "THREAD_POSTS_LISTED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ServerFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::FixturesLoaded,
            Event::ServerStart,
            Event::ServerFailed,
            Event::PostsCreated,
            Event::PostUpdated,
            Event::ThreadPostsListed,
            Event::RequestFailed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::ServerFailed.is_fatal());
        assert!(!Event::PostsCreated.is_fatal());
        assert!(!Event::RequestFailed.is_fatal());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::PostsCreated), "POSTS_CREATED");
    }
}
