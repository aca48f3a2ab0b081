mod http;

pub use http::{HttpStore, parse_base_url};
