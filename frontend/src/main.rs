mod api;
mod app;
mod clipboard;
mod components;
mod locale;
mod pages;
mod storage;
mod theme;
mod toast;
use browser_panic_hook::{CustomBody, IntoPanicHook};

#[cfg(not(debug_assertions))]
const LOG_LEVEL: log::Level = log::Level::Info;
#[cfg(debug_assertions)]
const LOG_LEVEL: log::Level = log::Level::Trace;

/// Page shown in place of the console after a panic.
fn panic_body(message: &str) -> String {
    format!(
        r#"
<div class="pf-v5-l-bullseye">
  <div class="pf-v5-l-bullseye__item">
    <div class="pf-v5-c-alert pf-m-danger" aria-label="Token console panicked">
      <p class="pf-v5-c-alert__title">Token console crashed</p>
      <div class="pf-v5-c-alert__description">
        <pre>{message}</pre>
        <p>Reload the page to continue. A remembered login signs you back in.</p>
      </div>
    </div>
  </div>
</div>
"#
    )
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(LOG_LEVEL));
    yew::set_custom_panic_hook(
        CustomBody(Box::new(|details| {
            log::error!("Token console panicked: {}", details.message());
            panic_body(&details.message().to_string())
        }))
        .into_panic_hook(),
    );
    log::info!("Starting token console {}", env!("CARGO_PKG_VERSION"));
    yew::Renderer::<app::Application>::new().render();
}
