pub const DEFAULT_BASE_URL: &str = "http://frontend-svc";
pub const DEFAULT_INTERVAL_SECONDS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = concat!("synthload/", env!("CARGO_PKG_VERSION"));
