pub mod error;
pub mod ods_client;
