use crate::app::use_console;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let ctx = use_console();
    let label = ctx.session.theme().toggle_label();
    let onclick = {
        let console = ctx.console.clone();
        Callback::from(move |_: MouseEvent| {
            console.toggle_theme();
        })
    };
    html! {
        <Button variant={ButtonVariant::Plain} {label} {onclick} />
    }
}
