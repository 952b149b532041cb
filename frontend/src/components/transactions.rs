use dioxus::prelude::*;
use moontracker_client::{
  categories::CategoryLists,
  feed::{FeedFilter, FeedSnapshot, Placeholder, TransactionRow},
  models::TransactionType,
  Command,
};

#[component]
pub fn TransactionList(feed: ReadOnlySignal<Option<FeedSnapshot>>, categories: ReadOnlySignal<CategoryLists>) -> Element {
  let dashboard = use_coroutine_handle::<Command>();
  let snapshot = feed();
  let filter = snapshot.as_ref().map(|s| s.filter.clone()).unwrap_or_default();
  let has_more = snapshot.as_ref().is_some_and(FeedSnapshot::can_load_more);

  rsx! {
    div {
      class: "table-card transactions-card",
      div {
        class: "transactions-header",
        h3 { "Transactions" }
        FilterBar { filter, categories }
      },
      match snapshot {
        None => rsx! { p { class: "placeholder", "Loading…" } },
        Some(snapshot) => rsx! {
          ul {
            class: "transaction-list",
            for row in snapshot.rows {
              TransactionItem { key: "{row.id}", row }
            }
          }
          match snapshot.placeholder {
            Placeholder::None => rsx! {},
            Placeholder::Loading => rsx! { p { class: "placeholder", "Loading…" } },
            Placeholder::Empty => rsx! { p { class: "placeholder", "No transactions yet" } },
            Placeholder::Error(msg) => rsx! { p { class: "placeholder placeholder-error", "{msg}" } },
          }
        }
      },
      if has_more {
        button {
          class: "button load-more",
          onclick: move |_evt| dashboard.send(Command::LoadMore),
          "Load more"
        }
      }
    }
  }
}

#[component]
fn TransactionItem(row: TransactionRow) -> Element {
  let dashboard = use_coroutine_handle::<Command>();
  let kind_class = match row.kind {
    TransactionType::Income => "amount-income",
    TransactionType::Expense => "amount-expense",
  };
  let id = row.id;

  rsx! {
    li {
      class: "transaction-item",
      div {
        class: "transaction-main",
        p { class: "transaction-description", "{row.description}" }
        p {
          class: "transaction-meta",
          span { "{row.date}" }
          if let Some(category) = row.category {
            span { class: "transaction-category", "{category}" }
          }
        }
      },
      span { class: "transaction-amount {kind_class}", "{row.amount}" }
      button {
        class: "button button-danger button-small",
        title: "Delete",
        onclick: move |_evt| dashboard.send(Command::RequestDelete(id)),
        "✕"
      }
    }
  }
}

#[component]
fn FilterBar(filter: FeedFilter, categories: ReadOnlySignal<CategoryLists>) -> Element {
  let dashboard = use_coroutine_handle::<Command>();
  let kind_value = filter.kind.map(|k| k.as_str()).unwrap_or("");
  let category_value = filter.category.map(|c| c.to_string()).unwrap_or_default();
  let by_kind = filter.clone();
  let by_category = filter.clone();

  rsx! {
    div {
      class: "filter-bar",
      select {
        class: "form-input",
        value: "{kind_value}",
        onchange: move |evt| {
          let next = FeedFilter { kind: TransactionType::parse(&evt.value()), ..by_kind.clone() };
          dashboard.send(Command::Filter(next));
        },
        option { value: "", "All types" }
        option { value: "income", "Income" }
        option { value: "expense", "Expense" }
      }
      select {
        class: "form-input",
        value: "{category_value}",
        onchange: move |evt| {
          let next = FeedFilter { category: evt.value().parse().ok(), ..by_category.clone() };
          dashboard.send(Command::Filter(next));
        },
        option { value: "", "All categories" }
        for category in categories().all {
          option { key: "{category.id}", value: "{category.id}", "{category.name}" }
        }
      }
    }
  }
}
