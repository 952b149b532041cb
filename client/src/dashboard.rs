//! Command-driven orchestration of the dashboard state.
//!
//! The UI turns user intents into [`Command`]s and hands each one to
//! [`Dashboard::dispatch`]; the dashboard talks to the backend and pushes
//! every visible change out through a [`DashboardView`]. State lives behind a
//! shared `RefCell` that is never borrowed across an await, so commands may
//! overlap: a filter change can start while an older page is still in flight,
//! and the feed and stats guards drop whichever response comes back stale.

use std::{
  cell::{Ref, RefCell},
  rc::Rc,
};

use futures::join;
use tracing::{info, warn};

use crate::{
  api::Backend,
  categories::{self, CategoryCache, CategoryLists},
  config::ClientConfig,
  feed::{FeedFilter, FeedSnapshot, PageRequest, TransactionFeed},
  format::Formatter,
  models::TransactionId,
  mutation::{EntryForm, PendingDelete},
  notify::Severity,
  stats::{self, StatsAggregator, StatsView},
};

pub const CREATED_MESSAGE: &str = "Transaction added";
pub const DELETED_MESSAGE: &str = "Transaction deleted";
pub const SEEDED_MESSAGE: &str = "Default categories loaded";
pub const STATS_FAILED_MESSAGE: &str = "Could not load statistics";

/// Rendering seam between the state machines and whatever draws them.
pub trait DashboardView {
  fn render_feed(&self, feed: FeedSnapshot);
  fn render_stats(&self, stats: StatsView);
  fn render_categories(&self, lists: CategoryLists);
  fn render_pending_delete(&self, pending: PendingDelete);
  fn reset_form(&self);
  fn notify(&self, severity: Severity, message: String);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Init,
  Filter(FeedFilter),
  LoadMore,
  Submit(EntryForm),
  RequestDelete(TransactionId),
  ConfirmDelete,
  CancelDelete,
  SeedCategories,
  RefreshStats,
}

#[derive(Debug, Default)]
struct DashboardState {
  feed: TransactionFeed,
  stats: StatsAggregator,
  categories: CategoryCache,
  pending: PendingDelete,
}

/// Clones share the backend and the state.
pub struct Dashboard<B: Backend> {
  backend: Rc<B>,
  state: Rc<RefCell<DashboardState>>,
  formatter: Formatter,
}

impl<B: Backend> Clone for Dashboard<B> {
  fn clone(&self) -> Self {
    Self { backend: Rc::clone(&self.backend), state: Rc::clone(&self.state), formatter: self.formatter }
  }
}

impl<B: Backend> Dashboard<B> {
  pub fn new(backend: B, config: &ClientConfig) -> Self {
    let state = DashboardState { feed: TransactionFeed::new(config.page_size), ..Default::default() };
    Self { backend: Rc::new(backend), state: Rc::new(RefCell::new(state)), formatter: Formatter::new(config.locale) }
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  pub fn categories(&self) -> Ref<'_, CategoryCache> {
    Ref::map(self.state.borrow(), |s| &s.categories)
  }

  pub fn pending(&self) -> PendingDelete {
    self.state.borrow().pending
  }

  pub async fn dispatch<V: DashboardView>(&self, command: Command, view: &V) {
    match command {
      Command::Init => self.init(view).await,
      Command::Filter(filter) => self.load_page(true, filter, view).await,
      Command::LoadMore => {
        let filter = self.state.borrow().feed.filter().clone();
        self.load_page(false, filter, view).await
      }
      Command::Submit(form) => self.create(form, view).await,
      Command::RequestDelete(id) => {
        let requested = {
          let mut state = self.state.borrow_mut();
          state.pending.request(id).then_some(state.pending)
        };
        if let Some(pending) = requested {
          view.render_pending_delete(pending);
        }
      }
      Command::ConfirmDelete => {
        let awaiting = self.state.borrow().pending.awaiting();
        if let Some(id) = awaiting {
          self.delete(id, view).await;
        }
      }
      Command::CancelDelete => {
        let pending = {
          let mut state = self.state.borrow_mut();
          state.pending.cancel();
          state.pending
        };
        view.render_pending_delete(pending);
      }
      Command::SeedCategories => self.seed(view).await,
      Command::RefreshStats => self.sync_stats(view).await,
    }
  }

  async fn init<V: DashboardView>(&self, view: &V) {
    let loaded = self.state.borrow().categories.is_loaded();
    if !loaded {
      let result = self.backend.categories().await;
      self.state.borrow_mut().categories.apply(result);
    }
    let lists = self.state.borrow().categories.lists();
    view.render_categories(lists);
    self.refresh_all(view).await;
  }

  async fn load_page<V: DashboardView>(&self, reset: bool, filter: FeedFilter, view: &V) {
    let request = self.state.borrow_mut().feed.begin(reset, filter);
    let Some(request) = request else {
      return;
    };
    if request.is_reset() {
      view.render_feed(self.feed_snapshot());
    }
    self.sync_feed(request, view).await;
  }

  async fn create<V: DashboardView>(&self, form: EntryForm, view: &V) {
    let validated = form.validate(&self.state.borrow().categories);
    let new = match validated {
      Ok(new) => new,
      Err(e) => {
        info!("entry rejected locally: {}", e);
        view.notify(Severity::Error, e.user_message());
        return;
      }
    };
    match self.backend.create_transaction(&new).await {
      Ok(created) => {
        info!("created transaction {}", created.id);
        view.notify(Severity::Success, CREATED_MESSAGE.to_string());
        view.reset_form();
        self.refresh_all(view).await;
      }
      Err(e) => {
        warn!("create failed: {}", e);
        view.notify(Severity::Error, e.user_message());
      }
    }
  }

  async fn delete<V: DashboardView>(&self, id: TransactionId, view: &V) {
    let deleting = {
      let mut state = self.state.borrow_mut();
      state.pending.begin(id).then_some(state.pending)
    };
    let Some(deleting) = deleting else {
      return;
    };
    view.render_pending_delete(deleting);
    let result = self.backend.delete_transaction(id).await;
    let idle = {
      let mut state = self.state.borrow_mut();
      state.pending.finish();
      state.pending
    };
    view.render_pending_delete(idle);

    match result {
      Ok(()) => {
        info!("deleted transaction {}", id);
        view.notify(Severity::Info, DELETED_MESSAGE.to_string());
        self.refresh_all(view).await;
      }
      Err(e) => {
        warn!("delete of {} failed: {}", id, e);
        view.notify(Severity::Error, e.user_message());
      }
    }
  }

  async fn seed<V: DashboardView>(&self, view: &V) {
    let (seeded, fetched) = categories::seed_defaults(&*self.backend).await;
    self.state.borrow_mut().categories.apply(fetched);
    match seeded {
      Ok(()) => view.notify(Severity::Info, SEEDED_MESSAGE.to_string()),
      Err(e) => view.notify(Severity::Error, e.user_message()),
    }
    let lists = self.state.borrow().categories.lists();
    view.render_categories(lists);
    // category names on existing rows may have changed
    view.render_feed(self.feed_snapshot());
  }

  /// Re-fetches the feed from page 0 and both stats views. The two halves
  /// render as each completes.
  async fn refresh_all<V: DashboardView>(&self, view: &V) {
    let request = {
      let mut state = self.state.borrow_mut();
      let filter = state.feed.filter().clone();
      state.feed.begin(true, filter)
    };
    view.render_feed(self.feed_snapshot());

    match request {
      Some(request) => {
        join!(self.sync_feed(request, view), self.sync_stats(view));
      }
      None => self.sync_stats(view).await,
    }
  }

  async fn sync_feed<V: DashboardView>(&self, request: PageRequest, view: &V) {
    let result = self.backend.transactions(&request.query).await;
    let applied = self.state.borrow_mut().feed.complete(&request, result);
    if applied {
      view.render_feed(self.feed_snapshot());
    }
  }

  async fn sync_stats<V: DashboardView>(&self, view: &V) {
    let generation = self.state.borrow_mut().stats.begin();
    let (summary, detailed) = stats::fetch(&*self.backend).await;
    let applied = self.state.borrow_mut().stats.complete(generation, summary, detailed);
    let Some(result) = applied else {
      return;
    };
    let snapshot = self.state.borrow().stats.view(&self.formatter);
    view.render_stats(snapshot);
    if result.is_err() {
      view.notify(Severity::Error, STATS_FAILED_MESSAGE.to_string());
    }
  }

  fn feed_snapshot(&self) -> FeedSnapshot {
    let state = self.state.borrow();
    state.feed.snapshot(&state.categories, &self.formatter)
  }
}
