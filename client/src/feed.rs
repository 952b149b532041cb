//! Paginated, filterable view over the server's transaction collection.
//!
//! Fetching is split in two halves so the state never has to be borrowed
//! across an await point: [`TransactionFeed::begin`] moves the cursor and
//! hands out a [`PageRequest`], and [`TransactionFeed::complete`] applies the
//! response only if the request still matches the current filter session and
//! page cursor. Late responses from a superseded filter are dropped.

use tracing::{debug, info, warn};

use crate::{
  categories::CategoryCache,
  config::PAGE_SIZE,
  error::AppError,
  format::Formatter,
  models::{CategoryId, Transaction, TransactionId, TransactionQuery, TransactionType},
};

pub const NO_DESCRIPTION: &str = "No description";
pub const CATEGORY_LABEL: &str = "Category";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
  pub kind: Option<TransactionType>,
  pub category: Option<CategoryId>,
}

/// What is shown below (or instead of) the rendered rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
  None,
  Loading,
  Empty,
  Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
  session: u64,
  page: u32,
  pub query: TransactionQuery,
}

impl PageRequest {
  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn is_reset(&self) -> bool {
    self.page == 0
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
  pub id: TransactionId,
  pub description: String,
  pub date: String,
  pub category: Option<String>,
  pub amount: String,
  pub kind: TransactionType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
  pub rows: Vec<TransactionRow>,
  pub placeholder: Placeholder,
  pub has_more: bool,
  pub filter: FeedFilter,
}

impl FeedSnapshot {
  /// Another page can be asked for. A failed page stays retryable.
  pub fn can_load_more(&self) -> bool {
    self.has_more && self.placeholder != Placeholder::Loading
  }
}

#[derive(Debug, Clone)]
pub struct TransactionFeed {
  page: u32,
  page_size: u32,
  has_more: bool,
  filter: FeedFilter,
  rows: Vec<Transaction>,
  placeholder: Placeholder,
  // bumped on every reset, identifies the filter session a request belongs to
  session: u64,
}

impl Default for TransactionFeed {
  fn default() -> Self {
    Self::new(PAGE_SIZE)
  }
}

impl TransactionFeed {
  pub fn new(page_size: u32) -> Self {
    Self {
      page: 0,
      page_size: page_size.max(1),
      has_more: true,
      filter: FeedFilter::default(),
      rows: Vec::new(),
      placeholder: Placeholder::Loading,
      session: 0,
    }
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn page_size(&self) -> u32 {
    self.page_size
  }

  pub fn has_more(&self) -> bool {
    self.has_more
  }

  pub fn filter(&self) -> &FeedFilter {
    &self.filter
  }

  pub fn rows(&self) -> &[Transaction] {
    &self.rows
  }

  pub fn placeholder(&self) -> &Placeholder {
    &self.placeholder
  }

  /// Starts a page fetch. A reset (or any filter change) rewinds the cursor
  /// and drops the rendered rows immediately so the list shows a loading
  /// placeholder instead of rows from the previous filter.
  /// Returns `None` when there is nothing more to fetch.
  pub fn begin(&mut self, reset: bool, filter: FeedFilter) -> Option<PageRequest> {
    if reset || filter != self.filter {
      self.session += 1;
      self.page = 0;
      self.has_more = true;
      self.filter = filter;
      self.rows.clear();
      self.placeholder = Placeholder::Loading;
    }

    if !self.has_more {
      return None;
    }

    let query = TransactionQuery {
      skip: self.page * self.page_size,
      limit: self.page_size,
      kind: self.filter.kind,
      category_id: self.filter.category,
    };
    debug!("feed page {} requested (skip={}, limit={})", self.page, query.skip, query.limit);

    Some(PageRequest { session: self.session, page: self.page, query })
  }

  /// Next page under the current filter.
  pub fn load_more(&mut self) -> Option<PageRequest> {
    let filter = self.filter.clone();
    self.begin(false, filter)
  }

  /// Applies a fetch result. Returns `false` when the response was stale and
  /// discarded.
  pub fn complete(&mut self, request: &PageRequest, result: Result<Vec<Transaction>, AppError>) -> bool {
    if request.session != self.session || request.page != self.page {
      info!(
        "discarding stale feed page {} (session {}, current session {} page {})",
        request.page, request.session, self.session, self.page
      );
      return false;
    }

    match result {
      Ok(transactions) if transactions.is_empty() => {
        self.has_more = false;
        self.placeholder = if request.is_reset() { Placeholder::Empty } else { Placeholder::None };
      }
      Ok(transactions) => {
        let fetched = transactions.len();
        self.rows.extend(transactions);
        self.page += 1;
        self.has_more = fetched == self.page_size as usize;
        self.placeholder = Placeholder::None;
        debug!("feed appended {} rows, has_more={}", fetched, self.has_more);
      }
      Err(e) => {
        // cursor and has_more stay put so the same window can be retried
        warn!("feed page {} failed: {}", request.page, e);
        self.placeholder = Placeholder::Error(e.user_message());
      }
    }
    true
  }

  pub fn render_row(tx: &Transaction, categories: &CategoryCache, fmt: &Formatter) -> TransactionRow {
    let description = tx
      .description
      .as_deref()
      .map(str::trim)
      .filter(|d| !d.is_empty())
      .unwrap_or(NO_DESCRIPTION)
      .to_string();
    let category = tx.category_id.map(|id| {
      categories
        .get(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| CATEGORY_LABEL.to_string())
    });

    TransactionRow {
      id: tx.id,
      description,
      date: tx.created_at.as_deref().map(|ts| fmt.format_short_date(ts)).unwrap_or_default(),
      category,
      amount: fmt.format_signed(tx.amount, tx.kind),
      kind: tx.kind,
    }
  }

  pub fn snapshot(&self, categories: &CategoryCache, fmt: &Formatter) -> FeedSnapshot {
    FeedSnapshot {
      rows: self.rows.iter().map(|tx| Self::render_row(tx, categories, fmt)).collect(),
      placeholder: self.placeholder.clone(),
      has_more: self.has_more,
      filter: self.filter.clone(),
    }
  }
}
