pub mod duration;
pub mod invites;
pub mod sanitize;
