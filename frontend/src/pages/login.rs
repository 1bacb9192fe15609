use crate::{
    app::use_console,
    components::NoticeAlert,
    toast::{get_toast, toast_notice},
};
use patternfly_yew::prelude::*;
use token_console_common::notice::NoticeScope;
use token_console_dto::session::LoginForm;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let ctx = use_console();
    let form = use_state(LoginForm::default);
    let loading_state = use_state(|| false);
    let toast = get_toast(
        use_toaster().expect("Must be nested inside a ToastViewer"),
        ctx.console.config(),
    );

    let on_username = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(LoginForm {
                username: input.value(),
                ..(*form).clone()
            });
        })
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(LoginForm {
                password: input.value(),
                ..(*form).clone()
            });
        })
    };
    let on_remember = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(LoginForm {
                remember: input.checked(),
                ..(*form).clone()
            });
        })
    };

    let login_submit = {
        let form = form.clone();
        let loading_state = loading_state.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = (*form).clone();
            let loading_state = loading_state.clone();
            let toast = toast.clone();
            loading_state.set(true);
            ctx.spawn(|console| async move {
                let notice = console.login(&form).await;
                loading_state.set(false);
                toast_notice(&*toast, &notice);
            });
        })
    };

    html! {
        <Card>
            <CardTitle><h1>{"Admin login"}</h1></CardTitle>
            <CardBody>
                <NoticeAlert notice={ctx.session.notice(NoticeScope::Auth).cloned()} />
                if *loading_state {
                    <div>{"Logging in..."}</div>
                } else {
                    <form id="auth-section" onsubmit={login_submit}>
                        <TextInput
                            r#type={TextInputType::Text}
                            placeholder="Username"
                            value={form.username.clone()}
                            oninput={on_username}
                        />
                        <TextInput
                            r#type={TextInputType::Password}
                            placeholder="Password"
                            value={form.password.clone()}
                            oninput={on_password}
                        />
                        <label class="remember">
                            <input type="checkbox" checked={form.remember} onchange={on_remember} />
                            {" Remember me on this browser"}
                        </label>
                        <Button label="Login" variant={ButtonVariant::Primary} r#type={ButtonType::Submit} />
                    </form>
                }
            </CardBody>
        </Card>
    }
}
