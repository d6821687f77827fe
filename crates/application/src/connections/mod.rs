pub mod dtos;
pub mod gate;
pub mod list_connections;
pub mod list_pending;
pub mod request_connection;
pub mod respond_connection;

pub use gate::{counterparty_ids, is_connected};
