pub mod case;
pub mod expiry;
pub mod guild_config;
pub mod mute;
