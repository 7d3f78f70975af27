use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Dosetrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port when `DOSETRACK_PORT` is unset.
const DEFAULT_PORT: u16 = 8420;

/// Get the application data directory.
/// ~/Dosetrack/ on all platforms, overridable with DOSETRACK_DATA_DIR.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("DOSETRACK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Path of the single-file SQLite database.
pub fn database_path() -> PathBuf {
    app_data_dir().join("dosetrack.sqlite")
}

/// Address the HTTP server binds to.
pub fn bind_addr() -> SocketAddr {
    let port = std::env::var("DOSETRACK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,dosetrack=debug".to_string()
}
