use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Process start, reported as uptime by the admin health check.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Name used when the configuration does not set one.
pub const DEFAULT_SITE_NAME: &str = "Folio";
