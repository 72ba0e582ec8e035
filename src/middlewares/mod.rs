pub mod error_handler;
pub mod request_log;

pub use error_handler::{ErrorPolicy, error_handlers};
pub use request_log::RequestLog;
