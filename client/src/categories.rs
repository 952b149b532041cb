use tracing::{info, warn};

use crate::{
  api::Backend,
  error::AppError,
  models::{Category, CategoryId, TransactionType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
  Server,
  Fallback,
}

/// Category list as the form and the filter control consume it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryLists {
  pub income: Vec<Category>,
  pub expense: Vec<Category>,
  pub all: Vec<Category>,
}

// (name, type, icon, color)
const FALLBACK: [(&str, TransactionType, &str, &str); 12] = [
  ("Food", TransactionType::Expense, "🍔", "#ef4444"),
  ("Transport", TransactionType::Expense, "🚌", "#f97316"),
  ("Housing", TransactionType::Expense, "🏠", "#eab308"),
  ("Utilities", TransactionType::Expense, "💡", "#84cc16"),
  ("Entertainment", TransactionType::Expense, "🎮", "#06b6d4"),
  ("Health", TransactionType::Expense, "💊", "#3b82f6"),
  ("Shopping", TransactionType::Expense, "🛍️", "#8b5cf6"),
  ("Other", TransactionType::Expense, "📦", "#64748b"),
  ("Salary", TransactionType::Income, "💼", "#10b981"),
  ("Freelance", TransactionType::Income, "💻", "#14b8a6"),
  ("Investments", TransactionType::Income, "📈", "#22c55e"),
  ("Gifts", TransactionType::Income, "🎁", "#a3e635"),
];

/// The static set used when the backend has no categories (or is unreachable).
pub fn fallback_categories() -> Vec<Category> {
  FALLBACK
    .iter()
    .enumerate()
    .map(|(idx, (name, kind, icon, color))| Category {
      id: idx as CategoryId + 1,
      name: name.to_string(),
      kind: *kind,
      icon: Some(icon.to_string()),
      color: Some(color.to_string()),
    })
    .collect()
}

/// Asks the backend to populate its defaults, then fetches whatever exists
/// now, whether or not seeding reported success.
pub async fn seed_defaults<B: Backend>(backend: &B) -> (Result<(), AppError>, Result<Vec<Category>, AppError>) {
  let seeded = backend.seed_categories().await;
  if let Err(e) = &seeded {
    warn!("seeding default categories failed: {}", e);
  }
  (seeded, backend.categories().await)
}

/// Loaded once per session by the dashboard; reloaded after seeding.
#[derive(Debug, Clone, Default)]
pub struct CategoryCache {
  categories: Vec<Category>,
  source: Option<CategorySource>,
}

impl CategoryCache {
  pub fn is_loaded(&self) -> bool {
    self.source.is_some()
  }

  pub fn source(&self) -> Option<CategorySource> {
    self.source
  }

  /// Applies a category fetch. An empty or failed response falls back to
  /// the static set.
  pub fn apply(&mut self, result: Result<Vec<Category>, AppError>) {
    match result {
      Ok(categories) if !categories.is_empty() => {
        info!("loaded {} categories", categories.len());
        self.categories = categories;
        self.source = Some(CategorySource::Server);
      }
      Ok(_) => {
        info!("backend has no categories, using fallback set");
        self.use_fallback();
      }
      Err(e) => {
        warn!("category fetch failed, using fallback set: {}", e);
        self.use_fallback();
      }
    }
  }

  fn use_fallback(&mut self) {
    self.categories = fallback_categories();
    self.source = Some(CategorySource::Fallback);
  }

  pub fn get(&self, id: CategoryId) -> Option<&Category> {
    self.categories.iter().find(|c| c.id == id)
  }

  pub fn of_type(&self, kind: TransactionType) -> Vec<Category> {
    self.categories.iter().filter(|c| c.kind == kind).cloned().collect()
  }

  pub fn all(&self) -> &[Category] {
    &self.categories
  }

  pub fn lists(&self) -> CategoryLists {
    CategoryLists {
      income: self.of_type(TransactionType::Income),
      expense: self.of_type(TransactionType::Expense),
      all: self.categories.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{Call, Endpoint, MockBackend};

  #[test]
  fn fallback_has_eight_expense_and_four_income() {
    let fallback = fallback_categories();

    assert_eq!(fallback.len(), 12);
    assert_eq!(fallback.iter().filter(|c| c.kind == TransactionType::Expense).count(), 8);
    assert_eq!(fallback.iter().filter(|c| c.kind == TransactionType::Income).count(), 4);
  }

  #[test]
  fn empty_response_substitutes_fallback() {
    let mut cache = CategoryCache::default();

    cache.apply(Ok(vec![]));

    let lists = cache.lists();
    assert_eq!(cache.source(), Some(CategorySource::Fallback));
    assert_eq!(lists.income.len(), 4);
    assert_eq!(lists.expense.len(), 8);
    assert_eq!(lists.all.len(), 12);
  }

  #[test]
  fn failed_response_substitutes_fallback() {
    let mut cache = CategoryCache::default();

    cache.apply(Err(AppError::Connection("refused".into())));

    assert_eq!(cache.source(), Some(CategorySource::Fallback));
    assert_eq!(cache.all().len(), 12);
  }

  #[test]
  fn server_categories_replace_fallback() {
    let mut cache = CategoryCache::default();
    cache.apply(Ok(vec![]));

    cache.apply(Ok(MockBackend::sample_categories()));

    assert_eq!(cache.source(), Some(CategorySource::Server));
    assert_eq!(cache.get(2).map(|c| c.name.as_str()), Some("Groceries"));
    assert_eq!(cache.of_type(TransactionType::Income).len(), 2);
  }

  #[tokio::test]
  async fn seed_fetches_even_when_seeding_fails() {
    let backend = MockBackend::default();
    backend.fail(Endpoint::SeedCategories);

    let (seeded, fetched) = seed_defaults(&backend).await;

    assert!(seeded.is_err());
    assert_eq!(fetched, Ok(vec![]));
    assert_eq!(backend.calls(), vec![Call::SeedCategories, Call::Categories]);
  }

  #[tokio::test]
  async fn seed_returns_server_defaults() {
    let backend = MockBackend::default();

    let (seeded, fetched) = seed_defaults(&backend).await;

    assert!(seeded.is_ok());
    assert_eq!(fetched.unwrap().len(), 4);
  }
}
