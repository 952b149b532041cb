use std::time::Duration;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Success,
  Error,
  Info,
}

impl Severity {
  pub fn css_class(&self) -> &'static str {
    match self {
      Self::Success => "notification-success",
      Self::Error => "notification-error",
      Self::Info => "notification-info",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
  pub id: u64,
  pub message: String,
  pub severity: Severity,
  pub created_at: DateTime<Utc>,
}

/// Transient messages. Each one expires on its own timer; identical
/// messages are kept as separate entries.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationQueue {
  items: Vec<Notification>,
  next_id: u64,
  ttl: Duration,
}

impl Default for NotificationQueue {
  fn default() -> Self {
    Self::new(Duration::from_secs(5))
  }
}

impl NotificationQueue {
  pub fn new(ttl: Duration) -> Self {
    Self { items: Vec::new(), next_id: 1, ttl }
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: DateTime<Utc>) -> u64 {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push(Notification { id, message: message.into(), severity, created_at: now });
    id
  }

  /// Manual dismissal. Returns whether the notification was still present.
  pub fn dismiss(&mut self, id: u64) -> bool {
    let before = self.items.len();
    self.items.retain(|n| n.id != id);
    self.items.len() != before
  }

  pub fn items(&self) -> &[Notification] {
    &self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
  }

  #[test]
  fn identical_messages_are_not_deduplicated() {
    let mut queue = NotificationQueue::default();

    let first = queue.push("Saved", Severity::Success, at(0));
    let second = queue.push("Saved", Severity::Success, at(0));

    assert_ne!(first, second);
    assert_eq!(queue.items().len(), 2);
  }

  #[test]
  fn manual_dismiss_removes_only_that_notification() {
    let mut queue = NotificationQueue::default();
    let a = queue.push("a", Severity::Info, at(0));
    let b = queue.push("b", Severity::Info, at(0));

    assert!(queue.dismiss(a));
    assert!(!queue.dismiss(a));
    assert_eq!(queue.items().iter().map(|n| n.id).collect::<Vec<_>>(), vec![b]);
  }
}
