pub mod get_live;
pub mod get_ready;
