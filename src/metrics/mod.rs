use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated by a [`crate::runtime::Host`].
#[derive(Debug, Default, Clone)]
pub struct RuntimeMetrics {
    frames: u64,
    nodes_laid_out: u64,
    input_events: u64,
    consumed_events: u64,
}

impl RuntimeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, node_count: usize) {
        self.frames = self.frames.saturating_add(1);
        self.nodes_laid_out = self.nodes_laid_out.saturating_add(node_count as u64);
    }

    pub fn record_input(&mut self, consumed: bool) {
        self.input_events = self.input_events.saturating_add(1);
        if consumed {
            self.consumed_events = self.consumed_events.saturating_add(1);
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            frames: self.frames,
            nodes_laid_out: self.nodes_laid_out,
            input_events: self.input_events,
            consumed_events: self.consumed_events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub frames: u64,
    pub nodes_laid_out: u64,
    pub input_events: u64,
    pub consumed_events: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "runtime_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("frames".to_string(), json!(self.frames));
        map.insert("nodes_laid_out".to_string(), json!(self.nodes_laid_out));
        map.insert("input_events".to_string(), json!(self.input_events));
        map.insert("consumed_events".to_string(), json!(self.consumed_events));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut metrics = RuntimeMetrics::new();
        metrics.record_frame(5);
        metrics.record_frame(7);
        metrics.record_input(true);
        metrics.record_input(false);

        let snapshot = metrics.snapshot(Duration::from_millis(20));
        assert_eq!(snapshot.frames, 2);
        assert_eq!(snapshot.nodes_laid_out, 12);
        assert_eq!(snapshot.input_events, 2);
        assert_eq!(snapshot.consumed_events, 1);

        let event = snapshot.to_log_event("element_tree::metrics");
        assert_eq!(event.message, "runtime_metrics");
        assert_eq!(event.field("frames"), Some(&json!(2)));
    }
}
