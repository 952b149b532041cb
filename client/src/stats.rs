use futures::join;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use tracing::{info, warn};

use crate::{
  api::Backend,
  error::AppError,
  format::Formatter,
  models::{DetailedStats, StatsSummary, TransactionType},
};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const INCOME_LABEL: &str = "Income";
pub const EXPENSE_LABEL: &str = "Expense";

#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
  pub total_income: Decimal,
  pub total_expense: Decimal,
  pub balance: Decimal,
  pub transaction_count: u64,
}

impl From<StatsSummary> for StatsSnapshot {
  fn from(value: StatsSummary) -> Self {
    Self {
      total_income: value.total_income,
      total_expense: value.total_expense,
      balance: value.balance,
      transaction_count: value.transactions.total_count,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceState {
  Positive,
  Negative,
  Neutral,
}

impl BalanceState {
  pub fn of(balance: Decimal) -> Self {
    if balance.is_zero() {
      Self::Neutral
    } else if balance.is_sign_positive() {
      Self::Positive
    } else {
      Self::Negative
    }
  }

  pub fn css_class(&self) -> &'static str {
    match self {
      Self::Positive => "glow-green",
      Self::Negative => "glow-red",
      Self::Neutral => "glow-neutral",
    }
  }
}

/// Percent share of each slice; both are 0 when there is nothing to share.
pub fn two_slice_percents(income: Decimal, expense: Decimal) -> (f64, f64) {
  let total = income + expense;
  if total.is_zero() {
    return (0.0, 0.0);
  }
  let pct = |v: Decimal| (v / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0);
  (pct(income), pct(expense))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
  pub label: String,
  pub value: Decimal,
  pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
  /// One income and one expense value per category label, equal lengths.
  Breakdown { labels: Vec<String>, income: Vec<Decimal>, expense: Vec<Decimal> },
  /// Coarse view built from the flat totals.
  Totals { income: Slice, expense: Slice },
}

impl ChartData {
  pub fn totals(income: Decimal, expense: Decimal) -> Self {
    let (income_pct, expense_pct) = two_slice_percents(income, expense);
    Self::Totals {
      income: Slice { label: INCOME_LABEL.to_string(), value: income, percent: income_pct },
      expense: Slice { label: EXPENSE_LABEL.to_string(), value: expense, percent: expense_pct },
    }
  }

  /// Aligns the grouped stats into two parallel series. Categories keep the
  /// order in which the server first reports them.
  pub fn breakdown(detailed: &DetailedStats) -> Option<Self> {
    if detailed.category_stats.is_empty() {
      return None;
    }
    let mut labels: Vec<String> = Vec::new();
    let mut income: Vec<Decimal> = Vec::new();
    let mut expense: Vec<Decimal> = Vec::new();

    for stat in &detailed.category_stats {
      let label = stat.category.clone().unwrap_or_else(|| UNCATEGORIZED.to_string());
      let idx = match labels.iter().position(|l| *l == label) {
        Some(idx) => idx,
        None => {
          labels.push(label);
          income.push(Decimal::ZERO);
          expense.push(Decimal::ZERO);
          labels.len() - 1
        }
      };
      match stat.kind {
        TransactionType::Income => income[idx] += stat.total,
        TransactionType::Expense => expense[idx] += stat.total,
      }
    }
    Some(Self::Breakdown { labels, income, expense })
  }
}

/// Owned chart resource. Each refresh destroys the previous chart and
/// creates a new one under a fresh revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSlot {
  current: Option<ChartData>,
  revision: u64,
}

impl ChartSlot {
  pub fn replace(&mut self, chart: ChartData) -> Option<ChartData> {
    self.revision += 1;
    self.current.replace(chart)
  }

  pub fn current(&self) -> Option<&ChartData> {
    self.current.as_ref()
  }

  pub fn revision(&self) -> u64 {
    self.revision
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCards {
  pub income: String,
  pub expense: String,
  pub balance: String,
  pub count: u64,
  pub balance_state: BalanceState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
  pub cards: Option<StatCards>,
  pub chart: ChartSlot,
}

/// Fetches the summary and the breakdown concurrently.
pub async fn fetch<B: Backend>(backend: &B) -> (Result<StatsSummary, AppError>, Result<DetailedStats, AppError>) {
  join!(backend.stats(), backend.detailed_stats())
}

#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
  summary: Option<StatsSnapshot>,
  chart: ChartSlot,
  // bumped by every refresh; only the latest one may apply
  generation: u64,
}

impl StatsAggregator {
  pub fn summary(&self) -> Option<&StatsSnapshot> {
    self.summary.as_ref()
  }

  pub fn chart(&self) -> &ChartSlot {
    &self.chart
  }

  pub fn apply_summary(&mut self, result: Result<StatsSummary, AppError>) -> Result<(), AppError> {
    let summary = result?;
    self.summary = Some(summary.into());
    Ok(())
  }

  /// Never leaves the chart empty: a failed or empty breakdown degrades to
  /// the two-slice view of the totals.
  pub fn apply_breakdown(&mut self, result: Result<DetailedStats, AppError>) {
    let chart = match &result {
      Ok(detailed) => ChartData::breakdown(detailed)
        .unwrap_or_else(|| ChartData::totals(detailed.totals.income, detailed.totals.expense)),
      Err(e) => {
        info!("detailed stats unavailable, falling back to totals: {}", e);
        let (income, expense) = self
          .summary
          .as_ref()
          .map(|s| (s.total_income, s.total_expense))
          .unwrap_or((Decimal::ZERO, Decimal::ZERO));
        ChartData::totals(income, expense)
      }
    };
    if self.chart.replace(chart).is_some() {
      info!("chart replaced, revision {}", self.chart.revision());
    }
  }

  /// Starts a refresh and returns its generation.
  pub fn begin(&mut self) -> u64 {
    self.generation += 1;
    self.generation
  }

  /// Applies a fetched pair. The summary goes first so the breakdown
  /// fallback can use fresh totals. Returns `None` when a newer refresh was
  /// started after `generation`.
  pub fn complete(
    &mut self,
    generation: u64,
    summary: Result<StatsSummary, AppError>,
    detailed: Result<DetailedStats, AppError>,
  ) -> Option<Result<(), AppError>> {
    if generation != self.generation {
      info!("discarding stale stats refresh {} (current {})", generation, self.generation);
      return None;
    }
    let applied = self.apply_summary(summary);
    if let Err(e) = &applied {
      warn!("stats summary failed: {}", e);
    }
    self.apply_breakdown(detailed);
    Some(applied)
  }

  pub fn view(&self, fmt: &Formatter) -> StatsView {
    StatsView {
      cards: self.summary.as_ref().map(|s| StatCards {
        income: fmt.format_currency(s.total_income),
        expense: fmt.format_currency(s.total_expense),
        balance: fmt.format_currency(s.balance),
        count: s.transaction_count,
        balance_state: BalanceState::of(s.balance),
      }),
      chart: self.chart.clone(),
    }
  }
}
