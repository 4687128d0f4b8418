pub mod error_detail;
pub mod rate_limit;
pub mod security_headers;
