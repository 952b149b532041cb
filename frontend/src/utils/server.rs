use moontracker_client::ClientConfig;

/// Compile-time override, set through `.env` or the build environment.
pub const API_ORIGIN: Option<&str> = option_env!("API_ORIGIN");

/// Origin the backend lives on: the configured one, else the page's own.
pub fn api_origin() -> String {
  if let Some(origin) = API_ORIGIN.filter(|o| !o.trim().is_empty()) {
    return origin.to_string();
  }
  let window = web_sys::window().expect("global window should exist!");
  window.location().origin().expect("page origin should be readable")
}

pub fn app_config() -> ClientConfig {
  ClientConfig::for_origin(&api_origin())
}
