use chrono::Local;
use dioxus::{logger::tracing::info, prelude::*};
use moontracker_client::{
  format::Formatter,
  status::{StatusMonitor, StatusReport},
  ClientConfig, HttpBackend,
};
use crate::{utils::server::app_config, Route};

#[component]
pub fn Template() -> Element {
  static CSS: Asset = asset!("/assets/dashboard.css");
  let config = use_context_provider(app_config);
  use_hook(|| info!("api base: {}", config.api_base));

  rsx! {
    document::Stylesheet {href: CSS},
    Header { }
    Outlet::<Route> {}
    Footer { }
  }
}

#[component]
fn Header() -> Element {
  let config = use_context::<ClientConfig>();
  let formatter = Formatter::new(config.locale);
  let mut now = use_signal(|| Local::now().naive_local());
  let mut pulse = use_signal(|| false);
  let mut status = use_signal(StatusReport::default);

  // three independent timers: clock, pulse and status polling
  let clock_interval = config.clock_interval;
  use_future(move || async move {
    loop {
      now.set(Local::now().naive_local());
      async_std::task::sleep(clock_interval).await;
    }
  });

  let pulse_interval = config.pulse_interval;
  use_future(move || async move {
    loop {
      async_std::task::sleep(pulse_interval).await;
      let on = *pulse.peek();
      pulse.set(!on);
    }
  });

  let status_config = config.clone();
  use_future(move || {
    let config = status_config.clone();
    async move {
      let backend = HttpBackend::from_config(&config);
      let mut monitor = StatusMonitor::default();
      loop {
        status.set(monitor.check(&backend).await);
        async_std::task::sleep(config.status_interval).await;
      }
    }
  });

  let report = status();
  let pulse_class = if pulse() { "pulse" } else { "" };
  let api_class = report.api.css_class();
  let db_class = report.database.css_class();
  let (api_label, db_label) = (report.api_label(), report.database_label());
  let (date, clock) = (formatter.format_long_date(now().date()), formatter.format_clock(now()));

  rsx!{
    nav {
      div {
        class: "nav-container",
        Link {
          class: "logo",
          to: Route::Overview { },
          span { class: "logo-moon", "☾" }
          "MoonTracker"
        },
        div {
          class: "nav-clock",
          span { class: "nav-date", "{date}" }
          span { class: "nav-time", "{clock}" }
        },
        div {
          class: "status-panel",
          div {
            class: "status-item",
            span { class: "status-dot {api_class} {pulse_class}" }
            span { class: "status-label", "API" }
            span { class: "status-value", "{api_label}" }
          },
          div {
            class: "status-item",
            span { class: "status-dot {db_class} {pulse_class}" }
            span { class: "status-label", "DB" }
            span { class: "status-value", "{db_label}" }
          }
        }
      }
    }
  }
}

#[component]
fn Footer() -> Element {
  rsx!{
    footer {
      div {
        class: "footer-container",
        div {
          class: "copyright",
          p { "MoonTracker · personal finance" }
        }
      }
    }
  }
}
