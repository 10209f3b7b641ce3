pub mod antiraid;
pub mod expiry;
pub mod moderation;
pub mod modlog;
pub mod muted_role;
