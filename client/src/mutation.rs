use std::str::FromStr;
use rust_decimal::Decimal;

use crate::{
  categories::CategoryCache,
  error::AppError,
  models::{CategoryId, NewTransaction, TransactionId, TransactionType},
};

pub const INVALID_AMOUNT: &str = "Enter a valid amount";
pub const TOO_PRECISE_AMOUNT: &str = "Amount can have at most 2 decimal places";

/// Parses a user-typed amount. Accepts `,` as decimal separator and
/// thousands separated by spaces; rejects anything not strictly positive.
pub fn parse_amount(raw: &str) -> Result<Decimal, AppError> {
  let cleaned: String = raw
    .trim()
    .chars()
    .filter(|c| !c.is_whitespace())
    .map(|c| if c == ',' { '.' } else { c })
    .collect();
  let amount = Decimal::from_str(&cleaned).map_err(|_| AppError::Validation(INVALID_AMOUNT.to_string()))?;
  check_amount(amount)
}

fn check_amount(amount: Decimal) -> Result<Decimal, AppError> {
  if amount <= Decimal::ZERO {
    return Err(AppError::Validation(INVALID_AMOUNT.to_string()));
  }
  if amount.normalize().scale() > 2 {
    return Err(AppError::Validation(TOO_PRECISE_AMOUNT.to_string()));
  }
  Ok(amount)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickPreset {
  Coffee,
  Lunch,
  Shopping,
  Gift,
  Salary,
  Bonus,
}

impl QuickPreset {
  pub const ALL: [QuickPreset; 6] = [Self::Coffee, Self::Lunch, Self::Shopping, Self::Gift, Self::Salary, Self::Bonus];

  pub fn label(&self) -> &'static str {
    match self {
      Self::Coffee => "Coffee",
      Self::Lunch => "Lunch",
      Self::Shopping => "Shopping",
      Self::Gift => "Gift",
      Self::Salary => "Salary",
      Self::Bonus => "Bonus",
    }
  }

  pub fn amount(&self) -> &'static str {
    match self {
      Self::Coffee => "250",
      Self::Lunch => "600",
      Self::Shopping => "3000",
      Self::Gift => "1500",
      Self::Salary => "50000",
      Self::Bonus => "10000",
    }
  }

  pub fn kind(&self) -> TransactionType {
    match self {
      Self::Salary | Self::Bonus => TransactionType::Income,
      _ => TransactionType::Expense,
    }
  }
}

/// Contents of the entry form. Default type is income.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
  pub amount: String,
  pub description: String,
  pub kind: TransactionType,
  pub category: Option<CategoryId>,
}

impl EntryForm {
  pub fn apply_preset(&mut self, preset: QuickPreset) {
    self.amount = preset.amount().to_string();
    self.description = preset.label().to_string();
    if self.kind != preset.kind() {
      self.category = None;
    }
    self.kind = preset.kind();
  }

  pub fn set_kind(&mut self, kind: TransactionType) {
    if self.kind != kind {
      self.category = None;
    }
    self.kind = kind;
  }

  /// Client-side checks, run before any request is sent.
  pub fn validate(&self, categories: &CategoryCache) -> Result<NewTransaction, AppError> {
    let amount = parse_amount(&self.amount)?;
    if let Some(category) = self.category.and_then(|id| categories.get(id)) {
      if category.kind != self.kind {
        return Err(AppError::Validation(format!(
          "Category '{}' is for {} transactions",
          category.name, category.kind
        )));
      }
    }
    let description = Some(self.description.trim().to_string()).filter(|d| !d.is_empty());

    Ok(NewTransaction { amount, description, kind: self.kind, category_id: self.category })
  }
}

/// Delete confirmation state machine:
/// `Idle -> AwaitingConfirmation -> (Idle | Deleting -> Idle)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingDelete {
  #[default]
  Idle,
  AwaitingConfirmation(TransactionId),
  Deleting(TransactionId),
}

impl PendingDelete {
  /// Records the target and opens the confirmation surface. Ignored while a
  /// delete is already in flight.
  pub fn request(&mut self, id: TransactionId) -> bool {
    match self {
      Self::Deleting(_) => false,
      _ => {
        *self = Self::AwaitingConfirmation(id);
        true
      }
    }
  }

  /// Cancel, Escape or a click outside the surface. No request is issued.
  pub fn cancel(&mut self) {
    if let Self::AwaitingConfirmation(_) = self {
      *self = Self::Idle;
    }
  }

  pub fn awaiting(&self) -> Option<TransactionId> {
    match self {
      Self::AwaitingConfirmation(id) => Some(*id),
      _ => None,
    }
  }

  /// Moves to `Deleting` only if `id` is the confirmed target.
  pub fn begin(&mut self, id: TransactionId) -> bool {
    if self.awaiting() == Some(id) {
      *self = Self::Deleting(id);
      true
    } else {
      false
    }
  }

  /// Back to idle regardless of how the request went.
  pub fn finish(&mut self) {
    *self = Self::Idle;
  }

  pub fn is_open(&self) -> bool {
    !matches!(self, Self::Idle)
  }
}
