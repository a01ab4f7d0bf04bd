pub mod logger;
pub mod pcx_client;
pub mod search_extract;
