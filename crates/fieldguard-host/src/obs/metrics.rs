//! Minimal metrics registry for the guard.
//!
//! Counters with dynamic labels backed by `DashMap`. Labels are flattened
//! into sorted key vectors to keep deterministic ordering.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.value().load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

#[derive(Default)]
pub struct GuardMetrics {
    /// Hook invocations, by model and method string.
    pub interceptions: CounterVec,
    /// Protected keys removed from payloads, by model and field.
    pub fields_stripped: CounterVec,
    /// Writes rejected with READONLY_ERROR, by model.
    pub rejections: CounterVec,
    /// Relation writes whose target has no read-only guard, by model and relation.
    pub relation_passthrough: CounterVec,
}

impl GuardMetrics {
    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.interceptions.render("fieldguard_interceptions_total", &mut out);
        self.fields_stripped.render("fieldguard_fields_stripped_total", &mut out);
        self.rejections.render("fieldguard_rejections_total", &mut out);
        self.relation_passthrough
            .render("fieldguard_relation_passthrough_total", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_sorted_and_escaped() {
        let m = GuardMetrics::default();
        m.rejections.inc(&[("model", "Order")]);
        m.rejections.inc(&[("model", "Account")]);
        m.fields_stripped.add(&[("field", "a\"b"), ("model", "M")], 2);

        let text = m.render();
        let account = text.find("fieldguard_rejections_total{model=\"Account\"} 1");
        let order = text.find("fieldguard_rejections_total{model=\"Order\"} 1");
        assert!(account.is_some() && order.is_some());
        assert!(account < order);
        assert!(text.contains("fieldguard_fields_stripped_total{field=\"a\\\"b\",model=\"M\"} 2"));
        assert_eq!(m.fields_stripped.get(&[("model", "M"), ("field", "a\"b")]), 2);
    }
}
