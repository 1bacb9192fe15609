use crate::{
    app::use_console,
    toast::{get_toast, toast_notice},
};
use patternfly_yew::prelude::*;
use token_console_common::session::View;
use yew::prelude::*;

#[function_component(Logout)]
pub fn logout() -> Html {
    let ctx = use_console();
    let toast = get_toast(
        use_toaster().expect("Must be nested inside a ToastViewer"),
        ctx.console.config(),
    );

    let onclick = {
        let console = ctx.console.clone();
        Callback::from(move |_: MouseEvent| {
            let notice = console.logout();
            toast_notice(&*toast, &notice);
        })
    };

    let username = ctx
        .session
        .credential()
        .and_then(|c| c.username())
        .unwrap_or_default();

    html! {
        <>
            if ctx.session.view() == View::Admin {
                <>
                    <span class="logged-in-as">{format!("Logged in as {username}")}</span>
                    <Button label="Logout" variant={ButtonVariant::Secondary} {onclick} />
                </>
            }
        </>
    }
}
