use std::fmt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type TransactionId = i64;
pub type CategoryId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
  #[default]
  Income,
  Expense,
}

impl TransactionType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Income => "income",
      Self::Expense => "expense",
    }
  }

  /// Sign used when projecting a stored magnitude for display.
  pub fn sign(&self) -> char {
    match self {
      Self::Income => '+',
      Self::Expense => '-',
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "income" => Some(Self::Income),
      "expense" => Some(Self::Expense),
      _ => None,
    }
  }
}

impl fmt::Display for TransactionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/* Server Responses */
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
  pub id: TransactionId,
  /// Always a non-negative magnitude, the sign comes from `kind`.
  pub amount: Decimal,
  #[serde(rename = "type")]
  pub kind: TransactionType,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub category_id: Option<CategoryId>,
  #[serde(default)]
  pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub id: CategoryId,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: TransactionType,
  #[serde(default)]
  pub icon: Option<String>,
  #[serde(default)]
  pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionCount {
  pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsSummary {
  pub total_income: Decimal,
  pub total_expense: Decimal,
  pub balance: Decimal,
  pub transactions: TransactionCount,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Totals {
  pub income: Decimal,
  pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryStat {
  #[serde(default)]
  pub category: Option<String>,
  #[serde(rename = "type")]
  pub kind: TransactionType,
  pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetailedStats {
  pub totals: Totals,
  #[serde(default)]
  pub category_stats: Vec<CategoryStat>,
}

/* Server Requests */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
  #[serde(with = "rust_decimal::serde::float")]
  pub amount: Decimal,
  pub description: Option<String>,
  #[serde(rename = "type")]
  pub kind: TransactionType,
  pub category_id: Option<CategoryId>,
}

/// Query window for `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionQuery {
  pub skip: u32,
  pub limit: u32,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<TransactionType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category_id: Option<CategoryId>,
}
