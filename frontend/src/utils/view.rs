use chrono::Utc;
use dioxus::{logger::tracing::{info, warn}, prelude::*};
use moontracker_client::{
  categories::CategoryLists,
  dashboard::DashboardView,
  feed::FeedSnapshot,
  mutation::{EntryForm, PendingDelete},
  notify::{NotificationQueue, Severity},
  stats::StatsView,
};

/// Pushes dashboard updates into the page's signals.
#[derive(Clone, Copy)]
pub struct SignalView {
  pub feed: Signal<Option<FeedSnapshot>>,
  pub stats: Signal<Option<StatsView>>,
  pub categories: Signal<CategoryLists>,
  pub pending: Signal<PendingDelete>,
  pub form: Signal<EntryForm>,
  pub notifications: Signal<NotificationQueue>,
}

/// Hook creating the signals backing a [`SignalView`].
pub fn use_signal_view(notification_ttl: std::time::Duration) -> SignalView {
  SignalView {
    feed: use_signal(|| None),
    stats: use_signal(|| None),
    categories: use_signal(CategoryLists::default),
    pending: use_signal(PendingDelete::default),
    form: use_signal(EntryForm::default),
    notifications: use_signal(|| NotificationQueue::new(notification_ttl)),
  }
}

impl DashboardView for SignalView {
  fn render_feed(&self, feed: FeedSnapshot) {
    let mut signal = self.feed;
    signal.set(Some(feed));
  }

  fn render_stats(&self, stats: StatsView) {
    let mut signal = self.stats;
    signal.set(Some(stats));
  }

  fn render_categories(&self, lists: CategoryLists) {
    let mut signal = self.categories;
    signal.set(lists);
  }

  fn render_pending_delete(&self, pending: PendingDelete) {
    let mut signal = self.pending;
    signal.set(pending);
  }

  fn reset_form(&self) {
    let mut signal = self.form;
    signal.set(EntryForm::default());
  }

  fn notify(&self, severity: Severity, message: String) {
    let mut notifications = self.notifications;
    if severity == Severity::Error {
      warn!("notification: {}", message);
    } else {
      info!("notification: {}", message);
    }
    let id = notifications.write().push(message, severity, Utc::now());
    let ttl = notifications.peek().ttl();

    // every notification runs its own timer
    spawn(async move {
      async_std::task::sleep(ttl).await;
      // the page may be gone by now
      if let Ok(mut queue) = notifications.try_write() {
        queue.dismiss(id);
      }
    });
  }
}
