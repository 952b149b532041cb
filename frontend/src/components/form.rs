#![allow(non_snake_case)]

use dioxus::prelude::*;
use moontracker_client::{
  categories::CategoryLists,
  models::TransactionType,
  mutation::{EntryForm, QuickPreset},
  Command,
};

#[component]
pub fn EntryPanel(mut form: Signal<EntryForm>, categories: ReadOnlySignal<CategoryLists>) -> Element {
  let dashboard = use_coroutine_handle::<Command>();
  let current = form();
  let lists = categories();
  let category_value = current.category.map(|c| c.to_string()).unwrap_or_default();
  let kind_button = |kind: TransactionType| {
    if current.kind == kind { "button button-toggle active" } else { "button button-toggle" }
  };
  let (income_class, expense_class) = (kind_button(TransactionType::Income), kind_button(TransactionType::Expense));

  rsx! {
    form {
      id: "entry-form",
      class: "table-card entry-card",
      onsubmit: move |evt| {
        evt.prevent_default();
        dashboard.send(Command::Submit(form()));
      },
      h3 { "New transaction" }
      div {
        class: "form-group kind-toggle",
        button {
          r#type: "button",
          class: income_class,
          onclick: move |_evt| form.write().set_kind(TransactionType::Income),
          "Income"
        }
        button {
          r#type: "button",
          class: expense_class,
          onclick: move |_evt| form.write().set_kind(TransactionType::Expense),
          "Expense"
        }
      },
      div {
        class: "form-group",
        label { class: "form-label", "Amount" },
        input {
          class: "form-input",
          name: "amount",
          inputmode: "decimal",
          placeholder: "0,00",
          value: "{current.amount}",
          oninput: move |evt| form.write().amount = evt.value(),
        }
      },
      div {
        class: "form-group",
        label { class: "form-label", "Description" },
        input {
          class: "form-input",
          name: "description",
          value: "{current.description}",
          oninput: move |evt| form.write().description = evt.value(),
        }
      },
      div {
        class: "form-group",
        label { class: "form-label", "Category" },
        select {
          class: "form-input",
          name: "category",
          value: "{category_value}",
          onchange: move |evt| form.write().category = evt.value().parse().ok(),
          option { value: "", "No category" }
          optgroup {
            label: "Income",
            for category in lists.income {
              option { key: "{category.id}", value: "{category.id}", "{category.name}" }
            }
          }
          optgroup {
            label: "Expense",
            for category in lists.expense {
              option { key: "{category.id}", value: "{category.id}", "{category.name}" }
            }
          }
        }
      },
      div {
        class: "form-group presets",
        for (label, preset) in QuickPreset::ALL.map(|p| (p.label(), p)) {
          button {
            key: "{label}",
            r#type: "button",
            class: "button button-preset",
            onclick: move |_evt| form.write().apply_preset(preset),
            "{label}"
          }
        }
      },
      div {
        class: "form-actions",
        button { r#type: "submit", class: "button button-primary", "Add" },
        button {
          r#type: "button",
          class: "button",
          title: "Ask the server to create its default categories",
          onclick: move |_evt| dashboard.send(Command::SeedCategories),
          "Seed categories"
        }
      }
    }
  }
}
