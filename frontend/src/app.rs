use crate::{api::GlooTokenApi, pages::ConsolePage, storage::BrowserStore, theme};
use log::debug;
use patternfly_yew::prelude::*;
use std::{future::Future, rc::Rc};
use token_console_common::{config::ConsoleConfig, session::Session, Console};
use yew::prelude::*;

pub type BrowserConsole = Console<GlooTokenApi, BrowserStore>;

/// The console and the session snapshot the current render is drawn from.
#[derive(Clone)]
pub struct ConsoleContext {
    pub console: Rc<BrowserConsole>,
    pub session: Rc<Session>,
}

impl PartialEq for ConsoleContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.console, &other.console) && self.session == other.session
    }
}

impl ConsoleContext {
    /// Run a console operation on the UI thread's executor.
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<BrowserConsole>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(op(self.console.clone()));
    }
}

pub fn use_console() -> ConsoleContext {
    use_context::<ConsoleContext>().expect("Must be nested inside the Application")
}

fn load_config() -> ConsoleConfig {
    let config = ConsoleConfig::default()
        .with_api_base(option_env!("TOKEN_CONSOLE_API_BASE").unwrap_or_default());
    if let Err(e) = config.validate() {
        log::error!("Invalid console config, using defaults: {e}");
        return ConsoleConfig::default();
    }
    config
}

#[function_component(Application)]
pub fn app() -> Html {
    let console = use_memo((), |_| {
        let config = load_config();
        debug!("Console config: {:?}", config);
        Console::new(GlooTokenApi::new(&config.api_base), BrowserStore, config)
    });
    let session = use_state(|| console.snapshot());

    {
        let console = console.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            let setter = session.setter();
            console.subscribe(move |s| setter.set(s.clone()));
            wasm_bindgen_futures::spawn_local(async move {
                console.restore().await;
            });
            || ()
        });
    }

    use_effect_with(session.theme(), |theme| {
        theme::apply(*theme);
        || ()
    });

    let context = ConsoleContext {
        console,
        session: Rc::new((*session).clone()),
    };

    html! {
        <BackdropViewer>
          <ToastViewer>
            <ContextProvider<ConsoleContext> {context}>
              <ConsolePage/>
            </ContextProvider<ConsoleContext>>
          </ToastViewer>
        </BackdropViewer>
    }
}
