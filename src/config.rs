use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "ClinicFlow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen address, overridable via `CLINICFLOW_BIND`.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Get the application data directory
/// ~/ClinicFlow/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("ClinicFlow")
}

/// Get the SQLite database path, overridable via `CLINICFLOW_DB`
pub fn database_path() -> PathBuf {
    match std::env::var_os("CLINICFLOW_DB") {
        Some(path) => PathBuf::from(path),
        None => app_data_dir().join("clinic.db"),
    }
}

/// Get the socket address to serve on
pub fn bind_addr() -> String {
    std::env::var("CLINICFLOW_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}
