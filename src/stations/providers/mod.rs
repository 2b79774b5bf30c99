pub mod http;

pub use http::HttpStationSource;
