mod admin;
mod login;
use crate::{
    app::use_console,
    components::{loading_state::LoadingState, Logout, ThemeToggle},
};
use admin::AdminPage;
use login::LoginPage;
use patternfly_yew::prelude::*;
use token_console_common::session::View;
use yew::prelude::*;

/// Page chrome plus whichever of the two views the session is on.
#[function_component(ConsolePage)]
pub fn console_page() -> Html {
    let ctx = use_console();
    let brand = html! { <span class="brand">{"🔑 Token Console"}</span> };
    let tools = html! {
        <div class="tools">
            <ThemeToggle/>
            <Logout/>
        </div>
    };

    let content = match ctx.session.view() {
        View::Login if ctx.session.is_restoring() => {
            html! { <LoadingState message="Signing in ..." /> }
        }
        View::Login => html! { <LoginPage/> },
        View::Admin => html! { <AdminPage/> },
    };

    html! {
        <Page {brand} {tools}>
            <PageSection>{ content }</PageSection>
        </Page>
    }
}
