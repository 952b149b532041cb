use dioxus::prelude::*;
use moontracker_client::notify::NotificationQueue;

#[component]
pub fn Toasts(mut notifications: Signal<NotificationQueue>) -> Element {
  let items = notifications.read().items().to_vec();

  rsx! {
    div {
      class: "toast-stack",
      for (item, severity) in items.into_iter().map(|n| { let class = n.severity.css_class(); (n, class) }) {
        div {
          key: "{item.id}",
          class: "toast show {severity}",
          span { "{item.message}" }
          button {
            class: "toast-close",
            onclick: move |_evt| {
              notifications.write().dismiss(item.id);
            },
            "×"
          }
        }
      }
    }
  }
}
