pub mod embedding;
pub mod http;
pub mod model;
pub mod server;
pub mod weather;
