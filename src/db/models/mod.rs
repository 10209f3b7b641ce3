mod case;
mod guild_config;
mod mute_record;
mod pending_expiry;

pub use case::{Case, CaseKind};
pub use guild_config::GuildConfig;
pub use mute_record::MuteRecord;
pub use pending_expiry::{ExpiryKind, PendingExpiry};
