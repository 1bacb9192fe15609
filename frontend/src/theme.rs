use gloo_utils::document_element;
use log::error;
use token_console_common::theme::{Theme, DARK_THEME_CLASS};

/// Reflect `theme` on the document root.
pub fn apply(theme: Theme) {
    let root = document_element();
    if let Err(e) = root
        .class_list()
        .toggle_with_force(DARK_THEME_CLASS, theme.is_dark())
    {
        error!("Failed to set theme class: {e:?}");
    }
    if let Err(e) = root.set_attribute("data-theme", theme.as_ref()) {
        error!("Failed to set data-theme: {e:?}");
    }
}
