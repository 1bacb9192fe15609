use crate::{app::use_console, clipboard, toast::get_toast};
use gloo_timers::future::TimeoutFuture;
use log::error;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CopyButtonProps {
    pub text: AttrValue,
}

/// Copies `text`; the icon flips to a check mark for two seconds.
#[function_component(CopyButton)]
pub fn copy_button(props: &CopyButtonProps) -> Html {
    let ctx = use_console();
    let toast = get_toast(
        use_toaster().expect("Must be nested inside a ToastViewer"),
        ctx.console.config(),
    );
    let button_text = use_state(|| "📋".to_string());

    let onclick = {
        let text = props.text.clone();
        let button_text = button_text.clone();
        Callback::from(move |_: MouseEvent| {
            let text = text.clone();
            let button_text = button_text.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match clipboard::write_text(&text).await {
                    Ok(()) => {
                        button_text.set("✅".to_string());
                        toast(AlertType::Success, "Copied to clipboard!");
                        TimeoutFuture::new(2000).await;
                        button_text.set("📋".to_string());
                    }
                    Err(e) => error!("Failed to copy: {e}"),
                }
            });
        })
    };

    html! {
        <button title="Copy to clipboard" class="copy-button" {onclick}>
            <div class="copy-button-text">{ (*button_text).clone() }</div>
        </button>
    }
}
