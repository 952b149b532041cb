//! In-memory backend and recording view shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use futures::channel::oneshot;
use rust_decimal::Decimal;

use crate::{
  api::Backend,
  categories::CategoryLists,
  dashboard::DashboardView,
  error::AppError,
  feed::FeedSnapshot,
  models::{
    Category, CategoryId, CategoryStat, DetailedStats, NewTransaction, StatsSummary, Totals, Transaction,
    TransactionCount, TransactionId, TransactionQuery, TransactionType,
  },
  mutation::PendingDelete,
  notify::Severity,
  stats::StatsView,
};

pub const CREATED_AT: &str = "2025-01-05T10:00:00";

pub fn tx(id: TransactionId, amount: Decimal, kind: TransactionType) -> Transaction {
  Transaction { id, amount, kind, description: None, category_id: None, created_at: Some(CREATED_AT.to_string()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  Health,
  DbCheck,
  Stats,
  DetailedStats,
  Categories,
  SeedCategories,
  Transactions,
  Create,
  Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
  Health,
  DbCheck,
  Stats,
  DetailedStats,
  Categories,
  SeedCategories,
  Transactions(TransactionQuery),
  Create(NewTransaction),
  Delete(TransactionId),
}

#[derive(Debug, Default)]
struct Store {
  transactions: Vec<Transaction>,
  categories: Vec<Category>,
  next_id: TransactionId,
}

/// Behaves like the real server: newest first, filtered, skip/limit paging.
#[derive(Debug, Default)]
pub struct MockBackend {
  store: RefCell<Store>,
  failures: RefCell<HashMap<Endpoint, AppError>>,
  calls: RefCell<Vec<Call>>,
  held: RefCell<HashSet<Endpoint>>,
  parked: RefCell<Vec<oneshot::Sender<()>>>,
}

impl MockBackend {
  pub fn with_categories(categories: Vec<Category>) -> Self {
    let backend = Self::default();
    backend.store.borrow_mut().categories = categories;
    backend
  }

  pub fn sample_categories() -> Vec<Category> {
    let cat = |id, name: &str, kind| Category { id, name: name.to_string(), kind, icon: None, color: None };
    vec![
      cat(1, "Salary", TransactionType::Income),
      cat(2, "Groceries", TransactionType::Expense),
      cat(3, "Transport", TransactionType::Expense),
      cat(4, "Freelance", TransactionType::Income),
    ]
  }

  pub fn insert(&self, amount: Decimal, kind: TransactionType, category_id: Option<CategoryId>) -> Transaction {
    let mut store = self.store.borrow_mut();
    store.next_id += 1;
    let mut created = tx(store.next_id, amount, kind);
    created.category_id = category_id;
    store.transactions.push(created.clone());
    created
  }

  /// Every later call to `endpoint` fails with a transport error.
  pub fn fail(&self, endpoint: Endpoint) {
    self.fail_with(endpoint, AppError::Connection("connection refused".to_string()));
  }

  pub fn fail_with(&self, endpoint: Endpoint, error: AppError) {
    self.failures.borrow_mut().insert(endpoint, error);
  }

  /// Later calls to `endpoint` park until [`MockBackend::release`].
  pub fn hold(&self, endpoint: Endpoint) {
    self.held.borrow_mut().insert(endpoint);
  }

  /// Stops parking new calls; already parked ones stay parked.
  pub fn unhold(&self, endpoint: Endpoint) {
    self.held.borrow_mut().remove(&endpoint);
  }

  /// Lets every parked call through.
  pub fn release(&self) {
    for waiter in self.parked.borrow_mut().drain(..) {
      let _ = waiter.send(());
    }
  }

  async fn gate(&self, endpoint: Endpoint) {
    if !self.held.borrow().contains(&endpoint) {
      return;
    }
    let (tx, rx) = oneshot::channel();
    self.parked.borrow_mut().push(tx);
    let _ = rx.await;
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.borrow().clone()
  }

  pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
    self.calls.borrow().iter().filter(|c| pred(c)).count()
  }

  pub fn transaction_count(&self) -> usize {
    self.store.borrow().transactions.len()
  }

  fn record(&self, call: Call, endpoint: Endpoint) -> Result<(), AppError> {
    self.calls.borrow_mut().push(call);
    match self.failures.borrow().get(&endpoint) {
      Some(err) => Err(err.clone()),
      None => Ok(()),
    }
  }

  fn totals(&self) -> (Decimal, Decimal) {
    let store = self.store.borrow();
    store.transactions.iter().fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.kind {
      TransactionType::Income => (inc + t.amount, exp),
      TransactionType::Expense => (inc, exp + t.amount),
    })
  }
}

impl Backend for MockBackend {
  async fn health(&self) -> Result<(), AppError> {
    self.record(Call::Health, Endpoint::Health)
  }

  async fn db_check(&self) -> Result<serde_json::Value, AppError> {
    self.record(Call::DbCheck, Endpoint::DbCheck)?;
    Ok(serde_json::json!({ "status": "ok" }))
  }

  async fn stats(&self) -> Result<StatsSummary, AppError> {
    self.record(Call::Stats, Endpoint::Stats)?;
    self.gate(Endpoint::Stats).await;
    let (income, expense) = self.totals();
    Ok(StatsSummary {
      total_income: income,
      total_expense: expense,
      balance: income - expense,
      transactions: TransactionCount { total_count: self.transaction_count() as u64 },
    })
  }

  async fn detailed_stats(&self) -> Result<DetailedStats, AppError> {
    self.record(Call::DetailedStats, Endpoint::DetailedStats)?;
    self.gate(Endpoint::DetailedStats).await;
    let (income, expense) = self.totals();
    let store = self.store.borrow();
    let mut category_stats: Vec<CategoryStat> = Vec::new();
    for t in &store.transactions {
      let name = t
        .category_id
        .and_then(|id| store.categories.iter().find(|c| c.id == id))
        .map(|c| c.name.clone());
      match category_stats.iter_mut().find(|s| s.category == name && s.kind == t.kind) {
        Some(stat) => stat.total += t.amount,
        None => category_stats.push(CategoryStat { category: name, kind: t.kind, total: t.amount }),
      }
    }
    Ok(DetailedStats { totals: Totals { income, expense }, category_stats })
  }

  async fn categories(&self) -> Result<Vec<Category>, AppError> {
    self.record(Call::Categories, Endpoint::Categories)?;
    Ok(self.store.borrow().categories.clone())
  }

  async fn seed_categories(&self) -> Result<(), AppError> {
    self.record(Call::SeedCategories, Endpoint::SeedCategories)?;
    let mut store = self.store.borrow_mut();
    if store.categories.is_empty() {
      store.categories = Self::sample_categories();
    }
    Ok(())
  }

  async fn transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, AppError> {
    self.record(Call::Transactions(query.clone()), Endpoint::Transactions)?;
    self.gate(Endpoint::Transactions).await;
    let store = self.store.borrow();
    let mut matching: Vec<Transaction> = store
      .transactions
      .iter()
      .filter(|t| query.kind.map_or(true, |k| t.kind == k))
      .filter(|t| query.category_id.map_or(true, |c| t.category_id == Some(c)))
      .cloned()
      .collect();
    matching.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(matching.into_iter().skip(query.skip as usize).take(query.limit as usize).collect())
  }

  async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, AppError> {
    self.record(Call::Create(new.clone()), Endpoint::Create)?;
    if let Some(id) = new.category_id {
      let store = self.store.borrow();
      match store.categories.iter().find(|c| c.id == id) {
        None => return Err(AppError::Server { status: 404, detail: Some("Category not found".to_string()) }),
        Some(c) if c.kind != new.kind => {
          return Err(AppError::Server { status: 400, detail: Some("Category type mismatch".to_string()) })
        }
        Some(_) => {}
      }
    }
    let mut created = self.insert(new.amount, new.kind, new.category_id);
    created.description = new.description.clone();
    if let Some(stored) = self.store.borrow_mut().transactions.iter_mut().find(|t| t.id == created.id) {
      stored.description = created.description.clone();
    }
    Ok(created)
  }

  async fn delete_transaction(&self, id: TransactionId) -> Result<(), AppError> {
    self.record(Call::Delete(id), Endpoint::Delete)?;
    let mut store = self.store.borrow_mut();
    let before = store.transactions.len();
    store.transactions.retain(|t| t.id != id);
    if store.transactions.len() == before {
      return Err(AppError::Server { status: 404, detail: Some("Transaction not found".to_string()) });
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
  Feed(FeedSnapshot),
  Stats(StatsView),
  Categories(CategoryLists),
  Pending(PendingDelete),
  ResetForm,
  Notify(Severity, String),
}

/// Captures every call the dashboard makes, in order.
#[derive(Debug, Default)]
pub struct RecordingView {
  events: RefCell<Vec<Event>>,
}

impl RecordingView {
  pub fn events(&self) -> Vec<Event> {
    self.events.borrow().clone()
  }

  pub fn clear(&self) {
    self.events.borrow_mut().clear();
  }

  pub fn notifications(&self) -> Vec<(Severity, String)> {
    self
      .events
      .borrow()
      .iter()
      .filter_map(|e| match e {
        Event::Notify(severity, msg) => Some((*severity, msg.clone())),
        _ => None,
      })
      .collect()
  }

  pub fn last_feed(&self) -> Option<FeedSnapshot> {
    self.events.borrow().iter().rev().find_map(|e| match e {
      Event::Feed(snapshot) => Some(snapshot.clone()),
      _ => None,
    })
  }

  pub fn last_stats(&self) -> Option<StatsView> {
    self.events.borrow().iter().rev().find_map(|e| match e {
      Event::Stats(view) => Some(view.clone()),
      _ => None,
    })
  }

  pub fn last_pending(&self) -> Option<PendingDelete> {
    self.events.borrow().iter().rev().find_map(|e| match e {
      Event::Pending(p) => Some(*p),
      _ => None,
    })
  }

  pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
    self.events.borrow().iter().position(pred)
  }
}

impl DashboardView for RecordingView {
  fn render_feed(&self, feed: FeedSnapshot) {
    self.events.borrow_mut().push(Event::Feed(feed));
  }

  fn render_stats(&self, stats: StatsView) {
    self.events.borrow_mut().push(Event::Stats(stats));
  }

  fn render_categories(&self, lists: CategoryLists) {
    self.events.borrow_mut().push(Event::Categories(lists));
  }

  fn render_pending_delete(&self, pending: PendingDelete) {
    self.events.borrow_mut().push(Event::Pending(pending));
  }

  fn reset_form(&self) {
    self.events.borrow_mut().push(Event::ResetForm);
  }

  fn notify(&self, severity: Severity, message: String) {
    self.events.borrow_mut().push(Event::Notify(severity, message));
  }
}
