use dotenvy::dotenv;

fn main() {
  // Tell Cargo that if the env file changes, to rerun this build script.
  println!("cargo::rerun-if-changed=.env");
  println!("cargo::rerun-if-env-changed=API_ORIGIN");

  // optional: without it the app talks to the origin it was served from
  if let Err(e) = dotenv() {
    println!("cargo::warning=no .env loaded ({}), API_ORIGIN falls back to the page origin", e);
  }

  if let Ok(origin) = std::env::var("API_ORIGIN") {
    println!("cargo::rustc-env=API_ORIGIN={}", origin);
  }
}
