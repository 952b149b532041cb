use dioxus::prelude::*;
use moontracker_client::stats::StatsView;

const TITLES: [&str; 4] = ["Income", "Expense", "Balance", "Transactions"];

#[component]
pub fn StatsPanel(stats: ReadOnlySignal<Option<StatsView>>) -> Element {
  let Some(cards) = stats().and_then(|s| s.cards) else {
    // nothing loaded yet
    return rsx! {
      section {
        class: "stats-row",
        for title in TITLES {
          StatCard { key: "{title}", title: "{title}", value: "—", class: "stat-loading" }
        }
      }
    };
  };
  let balance_class = cards.balance_state.css_class();

  rsx! {
    section {
      class: "stats-row",
      StatCard { title: TITLES[0], value: cards.income, class: "stat-income" }
      StatCard { title: TITLES[1], value: cards.expense, class: "stat-expense" }
      StatCard { title: TITLES[2], value: cards.balance, class: "stat-balance {balance_class}" }
      StatCard { title: TITLES[3], value: "{cards.count}", class: "stat-count" }
    }
  }
}

#[component]
fn StatCard(#[props(into)] title: String, value: String, class: String) -> Element {
  rsx! {
    div {
      class: "stat-card {class}",
      p { class: "stat-title", "{title}" }
      p { class: "stat-value", "{value}" }
    }
  }
}
