use dioxus::{logger::tracing::info, prelude::*};
use futures_util::StreamExt;
use moontracker_client::{format::Formatter, ClientConfig, Command, Dashboard, HttpBackend};

use crate::{
  components::{
    chart::ChartPanel, form::EntryPanel, modal::DeleteModal, stats::StatsPanel, toast::Toasts,
    transactions::TransactionList,
  },
  utils::view::use_signal_view,
};

#[component]
pub fn Overview() -> Element {
  let config = use_context::<ClientConfig>();
  let formatter = Formatter::new(config.locale);
  let view = use_signal_view(config.notification_ttl);

  // Commands start in the order they were sent, each on its own task, so a
  // slow request never holds up the next command
  let dashboard = use_coroutine(move |mut rx: UnboundedReceiver<Command>| {
    let config = config.clone();
    async move {
      let dashboard = Dashboard::new(HttpBackend::from_config(&config), &config);
      while let Some(command) = rx.next().await {
        info!("dispatching {:?}", command);
        let dashboard = dashboard.clone();
        spawn(async move {
          dashboard.dispatch(command, &view).await;
        });
      }
    }
  });
  use_hook(|| dashboard.send(Command::Init));

  rsx! {
    div {
      class: "dashboard",
      StatsPanel { stats: view.stats },
      div {
        class: "dashboard-grid",
        div {
          class: "dashboard-left",
          EntryPanel { form: view.form, categories: view.categories },
          ChartPanel { stats: view.stats, formatter },
        },
        div {
          class: "dashboard-right",
          TransactionList { feed: view.feed, categories: view.categories }
        }
      }
      DeleteModal { pending: view.pending },
      Toasts { notifications: view.notifications }
    }
  }
}
