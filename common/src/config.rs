pub use token_console_dto::config::*;
