use crate::toast::alert_type;
use patternfly_yew::prelude::*;
use token_console_common::notice::Notice;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NoticeAlertProps {
    #[prop_or_default]
    pub notice: Option<Notice>,
}

/// Inline message for one console section; renders nothing without a notice.
#[function_component(NoticeAlert)]
pub fn notice_alert(props: &NoticeAlertProps) -> Html {
    match &props.notice {
        Some(notice) => html! {
            <Alert inline=true r#type={alert_type(notice.level)} title={notice.text.clone()} />
        },
        None => html! {},
    }
}
