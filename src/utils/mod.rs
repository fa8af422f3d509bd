pub mod extractor;
pub mod grading;
pub mod parameter_error_handler;
pub mod response;
pub mod spreadsheet;
pub mod sql;
pub mod statistics;
pub mod validate;

pub use extractor::SafeIDI64;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use response::{error_response, validation_response};
pub use sql::{contains_like, escape_like_pattern};
