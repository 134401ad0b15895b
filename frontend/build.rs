use dotenvy::dotenv;

const DEFAULT_DASHBOARD_URL: &str = "http://localhost:7575/api/dashboard";

fn main() {
  // Tell Cargo that if the env file changes, to rerun this build script.
  println!("cargo::rerun-if-changed=.env");
  println!("cargo::rerun-if-env-changed=DASHBOARD_URL");

  // a missing .env is fine, the default points at a local backend
  dotenv().ok();

  let url = std::env::var("DASHBOARD_URL").unwrap_or_else(|_| DEFAULT_DASHBOARD_URL.to_string());
  println!("cargo::rustc-env=DASHBOARD_URL={}", url);
}
