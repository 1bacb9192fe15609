mod copy_button;
pub mod loading_state;
mod logout;
mod notice_alert;
mod theme_toggle;
mod token_table;
pub use copy_button::CopyButton;
pub use logout::Logout;
pub use notice_alert::NoticeAlert;
pub use theme_toggle::ThemeToggle;
pub use token_table::TokenTable;
