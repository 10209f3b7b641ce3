pub mod antiraid;
pub mod modlogs;
pub mod mute_config;
