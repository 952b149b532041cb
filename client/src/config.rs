use std::time::Duration;

use crate::format::Locale;

pub const API_PREFIX: &str = "/api/v1";
pub const HEALTH_PATH: &str = "/health";
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
  pub api_base: String,
  pub health_url: String,
  pub page_size: u32,
  pub notification_ttl: Duration,
  pub status_interval: Duration,
  pub clock_interval: Duration,
  pub pulse_interval: Duration,
  pub locale: Locale,
}

impl ClientConfig {
  /// Derives both endpoints from the page origin, e.g. `https://host:8000`.
  pub fn for_origin(origin: &str) -> Self {
    let origin = origin.trim_end_matches('/');
    Self {
      api_base: format!("{}{}", origin, API_PREFIX),
      health_url: format!("{}{}", origin, HEALTH_PATH),
      page_size: PAGE_SIZE,
      notification_ttl: Duration::from_secs(5),
      status_interval: Duration::from_secs(30),
      clock_interval: Duration::from_secs(1),
      pulse_interval: Duration::from_secs(4),
      locale: Locale::default(),
    }
  }

  pub fn with_page_size(mut self, size: u32) -> Self {
    self.page_size = size.max(1);
    self
  }

  pub fn with_locale(mut self, locale: Locale) -> Self {
    self.locale = locale;
    self
  }
}
