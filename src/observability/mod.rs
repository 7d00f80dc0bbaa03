//! Observability subsystem for forumd
//!
//! - Structured logging (JSON lines)
//! - Counters for the post service
//! - Typed lifecycle and request events
//!
//! # Usage
//!
//! ```ignore
//! use forumd::observability::{Logger, Event, MetricsRegistry};
//!
//! Logger::info("POSTS_CREATED", &[("count", "3")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.record_batch(3);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    if event.is_fatal() {
        Logger::fatal(event.as_str(), fields);
    } else {
        Logger::info(event.as_str(), fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::FixturesLoaded, &[("users", "2"), ("threads", "1")]);
    }
}
