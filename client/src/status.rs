use futures::join;
use tracing::debug;

use crate::{api::Backend, error::AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeState {
  /// Not checked yet.
  #[default]
  Unknown,
  Reachable,
  /// The endpoint answered but reported a failure.
  Degraded,
  /// Transport error, nothing answered.
  Unreachable,
}

impl ProbeState {
  pub fn classify<T>(result: &Result<T, AppError>) -> Self {
    match result {
      Ok(_) => Self::Reachable,
      Err(e) if e.is_transport() => Self::Unreachable,
      Err(_) => Self::Degraded,
    }
  }

  pub fn css_class(&self) -> &'static str {
    match self {
      Self::Unknown => "status-unknown",
      Self::Reachable => "status-ok",
      Self::Degraded | Self::Unreachable => "status-error",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusReport {
  pub api: ProbeState,
  pub database: ProbeState,
}

impl StatusReport {
  pub fn api_label(&self) -> &'static str {
    match self.api {
      ProbeState::Unknown => "…",
      ProbeState::Reachable => "ONLINE",
      ProbeState::Degraded => "ERROR",
      ProbeState::Unreachable => "OFFLINE",
    }
  }

  pub fn database_label(&self) -> &'static str {
    match self.database {
      ProbeState::Unknown => "…",
      ProbeState::Reachable => "CONNECTED",
      ProbeState::Degraded => "ERROR",
      ProbeState::Unreachable => "OFFLINE",
    }
  }
}

/// Advisory health indicator. Overlapping checks are not cancelled; whichever
/// finishes last wins.
#[derive(Debug, Clone, Default)]
pub struct StatusMonitor {
  last: StatusReport,
}

impl StatusMonitor {
  pub fn last(&self) -> StatusReport {
    self.last
  }

  pub async fn check<B: Backend>(&mut self, backend: &B) -> StatusReport {
    let (health, db) = join!(backend.health(), backend.db_check());
    self.last = StatusReport {
      api: ProbeState::classify(&health),
      database: ProbeState::classify(&db),
    };
    debug!("status check: api={:?} db={:?}", self.last.api, self.last.database);
    self.last
  }
}
