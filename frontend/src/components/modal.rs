use dioxus::prelude::*;
use moontracker_client::{mutation::PendingDelete, Command};

/// Confirmation surface for a pending delete. Escape and a click on the
/// backdrop both cancel.
#[component]
pub fn DeleteModal(pending: ReadOnlySignal<PendingDelete>) -> Element {
  let dashboard = use_coroutine_handle::<Command>();
  let state = pending();
  if !state.is_open() {
    return rsx! {};
  }
  let deleting = matches!(state, PendingDelete::Deleting(_));

  rsx! {
    div {
      class: "modal-backdrop",
      tabindex: "0",
      onmounted: move |evt| async move {
        let _ = evt.set_focus(true).await;
      },
      onkeydown: move |evt| {
        if evt.key() == Key::Escape {
          dashboard.send(Command::CancelDelete);
        }
      },
      onclick: move |_evt| dashboard.send(Command::CancelDelete),
      div {
        class: "modal",
        onclick: move |evt| evt.stop_propagation(),
        h3 { "Delete transaction?" }
        p { "This cannot be undone." }
        div {
          class: "form-actions",
          button {
            class: "button button-danger",
            disabled: deleting,
            onclick: move |_evt| dashboard.send(Command::ConfirmDelete),
            if deleting { "Deleting…" } else { "Delete" }
          }
          button {
            class: "button",
            disabled: deleting,
            onclick: move |_evt| dashboard.send(Command::CancelDelete),
            "Cancel"
          }
        }
      }
    }
  }
}
