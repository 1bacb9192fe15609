use patternfly_yew::prelude::*;
use std::{rc::Rc, time::Duration};
use token_console_common::{
    config::ConsoleConfig,
    notice::{Notice, NoticeLevel},
};

pub fn alert_type(level: NoticeLevel) -> AlertType {
    match level {
        NoticeLevel::Success => AlertType::Success,
        NoticeLevel::Info => AlertType::Info,
        NoticeLevel::Error => AlertType::Danger,
    }
}

/// Use this to get toaster inside a component, nested in a ToastViewer:
///     let toast = get_toast(use_toaster().expect("Must be nested inside a ToastViewer"), config);
pub fn get_toast(toaster: Toaster, config: &ConsoleConfig) -> Rc<impl Fn(AlertType, &str)> {
    let error_secs = config.error_toast_secs;
    let secs = config.toast_secs;
    Rc::new(move |t: AlertType, msg: &str| {
        toaster.toast(Toast {
            title: msg.into(),
            timeout: Some(Duration::from_secs(match t {
                AlertType::Danger => error_secs,
                _ => secs,
            })),
            r#type: t,
            ..Default::default()
        });
    })
}

pub fn toast_notice(toast: &impl Fn(AlertType, &str), notice: &Notice) {
    toast(alert_type(notice.level), &notice.text);
}
