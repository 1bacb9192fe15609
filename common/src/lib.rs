//! Controller for the token admin console.
//!
//! Everything here is independent of the browser: the frontend plugs in a
//! [`api::TokenApi`] backed by `fetch` and a [`storage::KeyValueStore`]
//! backed by `localStorage`, then renders whatever the [`session::Session`]
//! holds.

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod notice;
pub mod session;
pub mod storage;
pub mod table;
pub mod theme;

pub use console::Console;
pub use token_console_dto as dto;
