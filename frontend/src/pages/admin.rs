use crate::{
    app::use_console,
    components::{CopyButton, NoticeAlert, TokenTable},
    locale::local_time,
    toast::{get_toast, toast_notice},
};
use gloo::dialogs::confirm;
use patternfly_yew::prelude::*;
use token_console_common::{notice::NoticeScope, table::table_body};
use token_console_dto::token::TokenId;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let ctx = use_console();
    let session = ctx.session.clone();
    let toast = get_toast(
        use_toaster().expect("Must be nested inside a ToastViewer"),
        ctx.console.config(),
    );

    let on_generate = {
        let ctx = ctx.clone();
        let toast = toast.clone();
        Callback::from(move |_: MouseEvent| {
            let toast = toast.clone();
            ctx.spawn(|console| async move {
                if let Some(notice) = console.generate().await {
                    toast_notice(&*toast, &notice);
                }
            });
        })
    };
    let on_refresh = {
        let ctx = ctx.clone();
        let toast = toast.clone();
        Callback::from(move |_: MouseEvent| {
            let toast = toast.clone();
            ctx.spawn(|console| async move {
                if let Some(notice) = console.refresh().await {
                    toast_notice(&*toast, &notice);
                }
            });
        })
    };
    let on_toggle = {
        let ctx = ctx.clone();
        let toast = toast.clone();
        Callback::from(move |(id, active): (TokenId, bool)| {
            let toast = toast.clone();
            ctx.spawn(move |console| async move {
                if let Some(notice) = console.set_active(id, active).await {
                    toast_notice(&*toast, &notice);
                }
            });
        })
    };
    let on_delete = {
        let ctx = ctx.clone();
        Callback::from(move |id: TokenId| {
            let toast = toast.clone();
            ctx.spawn(move |console| async move {
                if let Some(notice) = console.delete(id, confirm).await {
                    toast_notice(&*toast, &notice);
                }
            });
        })
    };

    let generated = session.generated().map(|token| {
        let token = AttrValue::from(token.to_string());
        html! {
            <div id="new-token-display" class="new-token">
                <p>{"New token (copy it now, it will not be highlighted again):"}</p>
                <code id="generated-token-value">{token.clone()}</code>
                <CopyButton text={token} />
            </div>
        }
    });

    html! {
        <div id="admin-section">
            <Card>
                <CardTitle><h2>{"Generate token"}</h2></CardTitle>
                <CardBody>
                    <Button label="Generate New Token" variant={ButtonVariant::Primary} onclick={on_generate} />
                    <NoticeAlert notice={session.notice(NoticeScope::Generate).cloned()} />
                    { for generated }
                </CardBody>
            </Card>
            <Card>
                <CardTitle><h2>{"Tokens"}</h2></CardTitle>
                <CardBody>
                    <Button label="Refresh" variant={ButtonVariant::Secondary} onclick={on_refresh} />
                    <NoticeAlert notice={session.notice(NoticeScope::Tokens).cloned()} />
                    <TokenTable body={table_body(&session, local_time)} {on_toggle} {on_delete} />
                </CardBody>
            </Card>
            <CheckToken/>
        </div>
    }
}

/// Ask the API whether a token value is currently valid.
#[function_component(CheckToken)]
fn check_token() -> Html {
    let ctx = use_console();
    let value = use_state(String::new);
    let toast = get_toast(
        use_toaster().expect("Must be nested inside a ToastViewer"),
        ctx.console.config(),
    );

    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };
    let onsubmit = {
        let value = value.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let token = (*value).clone();
            let toast = toast.clone();
            ctx.spawn(|console| async move {
                let notice = console.check(&token).await;
                toast_notice(&*toast, &notice);
            });
        })
    };

    html! {
        <Card>
            <CardTitle><h2>{"Check token"}</h2></CardTitle>
            <CardBody>
                <form {onsubmit}>
                    <TextInput
                        r#type={TextInputType::Text}
                        placeholder="Token value"
                        value={(*value).clone()}
                        {oninput}
                    />
                    <Button label="Check" variant={ButtonVariant::Secondary} r#type={ButtonType::Submit} />
                </form>
                <NoticeAlert notice={ctx.session.notice(NoticeScope::Check).cloned()} />
            </CardBody>
        </Card>
    }
}
