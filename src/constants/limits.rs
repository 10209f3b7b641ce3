/// Poll interval of the expiry scheduler, in seconds
pub const DEFAULT_EXPIRY_POLL_SECONDS: u64 = 30;

/// Base delay before retrying a failed scheduled reversal, in seconds
pub const EXPIRY_RETRY_BASE_SECONDS: i64 = 60;

/// Upper bound on the retry delay, in seconds
pub const EXPIRY_RETRY_MAX_SECONDS: i64 = 3600;

/// Discord caps message-history deletion on ban at 7 days
pub const MAX_DELETE_MESSAGE_DAYS: u8 = 7;

/// Name of the auto-created restricted role
pub const MUTED_ROLE_NAME: &str = "muted";
