pub mod event_handler;
pub mod member_join;
