use crate::{
    api::TokenApi,
    config::ConsoleConfig,
    error::ApiError,
    notice::{Notice, NoticeScope},
    session::Session,
    storage::{clear_credential, load_credential, save_credential, KeyValueStore},
    theme::Theme,
};
use log::{debug, error, info, warn};
use std::{cell::RefCell, rc::Rc};
use token_console_dto::{
    session::{Credential, LoginForm},
    token::{TokenId, TokenRecord, TokenUpdate},
};

pub const AUTH_EXPIRED: &str = "Authentication failed. Please log in again.";

type Observer = Rc<dyn Fn(&Session)>;

/// The admin console controller.
///
/// Shared as `Rc<Console<..>>` on the UI thread. Operations borrow the
/// session only between awaits, so several may be in flight at once.
pub struct Console<A, S> {
    api: A,
    store: S,
    config: ConsoleConfig,
    session: RefCell<Session>,
    observer: RefCell<Option<Observer>>,
}

impl<A: TokenApi, S: KeyValueStore> Console<A, S> {
    pub fn new(api: A, store: S, config: ConsoleConfig) -> Self {
        let theme = Theme::load(&store, &config.theme_key);
        Self {
            api,
            store,
            config,
            session: RefCell::new(Session::new(theme)),
            observer: RefCell::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Call `observer` with a fresh snapshot after every session change.
    pub fn subscribe(&self, observer: impl Fn(&Session) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let (result, snapshot) = {
            let mut session = self.session.borrow_mut();
            let result = f(&mut session);
            (result, session.clone())
        };
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&snapshot);
        }
        result
    }

    fn credential(&self) -> Option<Credential> {
        self.session.borrow().credential().cloned()
    }

    fn notify(&self, notice: Notice) -> Notice {
        self.update(|s| s.set_notice(notice.clone()));
        notice
    }

    fn epoch(&self) -> u64 {
        self.session.borrow().epoch()
    }

    /// True while the operator who started work at `epoch` is still the one
    /// signed in.
    fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch
    }

    /// The credential was rejected mid-session: forget it everywhere and go
    /// back to the login view. A rejection of a credential from an ended
    /// session is dropped.
    fn expire(&self, epoch: u64) -> Option<Notice> {
        if !self.is_current(epoch) {
            warn!("Ignoring 401 for a credential from an ended session");
            return None;
        }
        warn!("Credential rejected by the token API, returning to login");
        clear_credential(&self.store, &self.config.credential_key);
        Some(self.update(|s| {
            s.sign_out();
            let notice = Notice::error(NoticeScope::Auth, AUTH_EXPIRED);
            s.set_notice(notice.clone());
            notice
        }))
    }

    /// Show `tokens` as the verified result of a list request.
    fn show_verified(&self, tokens: Vec<TokenRecord>) {
        self.update(|s| {
            let generation = s.begin_list();
            s.finish_list(generation, Some(tokens));
        });
    }

    /// Auto-login with the stored credential, if there is one.
    pub async fn restore(&self) -> Option<Notice> {
        let credential = load_credential(&self.store, &self.config.credential_key)?;
        debug!("Found stored credential, verifying");
        let epoch = self.update(|s| {
            s.set_restoring(true);
            s.epoch()
        });
        let result = self.api.list_tokens(&credential).await;
        self.update(|s| s.set_restoring(false));
        if !self.is_current(epoch) {
            debug!("Session changed while verifying the stored credential");
            return None;
        }
        match result {
            Ok(tokens) => {
                info!("Stored credential accepted");
                self.update(|s| s.authenticate(credential));
                self.show_verified(tokens);
                None
            }
            Err(e) => {
                info!("Stored credential not accepted ({e}), discarding it");
                clear_credential(&self.store, &self.config.credential_key);
                self.update(|s| s.sign_out());
                None
            }
        }
    }

    /// Verify the entered credential and open the admin view.
    pub async fn login(&self, form: &LoginForm) -> Notice {
        if form.username.trim().is_empty() {
            return self.notify(Notice::error(NoticeScope::Auth, "Please enter a username."));
        }
        self.update(|s| s.clear_notice(NoticeScope::Auth));
        let credential = form.credential();
        debug!("Verifying credential for {}", form.username);
        match self.api.list_tokens(&credential).await {
            Ok(tokens) => {
                if form.remember {
                    if let Err(e) =
                        save_credential(&self.store, &self.config.credential_key, &credential)
                    {
                        error!("{e}");
                    }
                } else {
                    clear_credential(&self.store, &self.config.credential_key);
                }
                info!("Logged in as {}", form.username);
                self.update(|s| s.authenticate(credential));
                self.show_verified(tokens);
                self.notify(Notice::success(NoticeScope::Auth, "Login successful!"))
            }
            Err(e) => {
                error!("Login error: {e}");
                let text = match &e {
                    ApiError::Transport(_) | ApiError::Decode(_) => {
                        "An error occurred during login.".to_string()
                    }
                    _ => e.detail().unwrap_or("Login failed.").to_string(),
                };
                self.notify(Notice::error(NoticeScope::Auth, text))
            }
        }
    }

    /// Forget the credential locally. No request is made.
    pub fn logout(&self) -> Notice {
        clear_credential(&self.store, &self.config.credential_key);
        info!("Logged out");
        self.update(|s| {
            s.sign_out();
            let notice = Notice::success(NoticeScope::Auth, "Logged out.");
            s.set_notice(notice.clone());
            notice
        })
    }

    /// Reload the token table. `None` on success or when not logged in.
    pub async fn refresh(&self) -> Option<Notice> {
        let credential = self.credential()?;
        let epoch = self.epoch();
        let generation = self.update(|s| s.begin_list());
        debug!("Loading tokens (generation {generation})");
        match self.api.list_tokens(&credential).await {
            Ok(tokens) => {
                if !self.update(|s| s.finish_list(generation, Some(tokens))) {
                    debug!("Discarded superseded token list (generation {generation})");
                }
                None
            }
            Err(e) if e.is_unauthorized() => self.expire(epoch),
            Err(e) => {
                error!("Error fetching tokens: {e}");
                if !self.session.borrow().is_current_list(generation) {
                    return None;
                }
                self.update(|s| s.finish_list(generation, None));
                Some(self.notify(Notice::error(NoticeScope::Tokens, "Failed to load tokens.")))
            }
        }
    }

    fn reserve(&self, id: TokenId) -> Result<(), Notice> {
        if self.update(|s| s.reserve(id)) {
            Ok(())
        } else {
            debug!("Token {id} is busy, ignoring request");
            Err(self.notify(Notice::info(
                NoticeScope::Tokens,
                format!("An operation on token {id} is already in progress."),
            )))
        }
    }

    /// Re-read the list after a successful change, then report `done`
    /// unless the reload itself produced a notice.
    async fn settle(&self, epoch: u64, done: Notice) -> Option<Notice> {
        match self.refresh().await {
            Some(notice) => Some(notice),
            None if self.is_current(epoch) => Some(self.notify(done)),
            None => None,
        }
    }

    /// Ask the server to set the active flag of `id`.
    pub async fn set_active(&self, id: TokenId, is_active: bool) -> Option<Notice> {
        let credential = self.credential()?;
        let epoch = self.epoch();
        if let Err(notice) = self.reserve(id) {
            return Some(notice);
        }
        self.update(|s| s.clear_notice(NoticeScope::Tokens));
        debug!("Setting token {id} active={is_active}");
        let result = self
            .api
            .update_token(&credential, id, &TokenUpdate::set_active(is_active))
            .await;
        if !self.is_current(epoch) {
            debug!("Session changed while updating token {id}, dropping the result");
            return None;
        }
        self.update(|s| s.release(id));
        match result {
            Ok(()) => {
                let status = if is_active { "Active" } else { "Inactive" };
                self.settle(
                    epoch,
                    Notice::success(
                        NoticeScope::Tokens,
                        format!("Token {id} status updated to {status}."),
                    ),
                )
                .await
            }
            Err(e) if e.is_unauthorized() => self.expire(epoch),
            Err(e) => {
                error!("Error toggling token status: {e}");
                Some(self.notify(Notice::error(
                    NoticeScope::Tokens,
                    "Failed to update token status.",
                )))
            }
        }
    }

    /// Delete `id` once `confirm` agrees. `None` when cancelled.
    pub async fn delete(&self, id: TokenId, confirm: impl FnOnce(&str) -> bool) -> Option<Notice> {
        let credential = self.credential()?;
        if self.session.borrow().is_pending(id) {
            return self.reserve(id).err();
        }
        if !confirm(&format!("Are you sure you want to delete token ID {id}?")) {
            debug!("Deletion of token {id} cancelled");
            return None;
        }
        let epoch = self.epoch();
        if let Err(notice) = self.reserve(id) {
            return Some(notice);
        }
        self.update(|s| s.clear_notice(NoticeScope::Tokens));
        debug!("Deleting token {id}");
        let result = self.api.delete_token(&credential, id).await;
        if !self.is_current(epoch) {
            debug!("Session changed while deleting token {id}, dropping the result");
            return None;
        }
        self.update(|s| s.release(id));
        match result {
            Ok(()) => {
                self.settle(
                    epoch,
                    Notice::success(NoticeScope::Tokens, format!("Token {id} deleted successfully.")),
                )
                .await
            }
            Err(e) if e.is_unauthorized() => self.expire(epoch),
            Err(e) => {
                error!("Error deleting token: {e}");
                Some(self.notify(Notice::error(NoticeScope::Tokens, "Failed to delete token.")))
            }
        }
    }

    /// Create a token and keep its value for one-time display. `None` when
    /// the operator changed before the server answered.
    pub async fn generate(&self) -> Option<Notice> {
        let Some(credential) = self.credential() else {
            return Some(self.notify(Notice::error(NoticeScope::Generate, "Please log in first.")));
        };
        let epoch = self.update(|s| {
            s.clear_notice(NoticeScope::Generate);
            s.set_generated(None);
            s.epoch()
        });
        debug!("Generating token");
        let result = self.api.generate_token(&credential).await;
        if !self.is_current(epoch) {
            debug!("Session changed while generating a token, dropping the result");
            return None;
        }
        match result {
            Ok(generated) => {
                info!("Generated token {:?}", generated.id);
                self.update(|s| s.set_generated(Some(generated.token)));
                let notice = self.notify(Notice::success(
                    NoticeScope::Generate,
                    "Token generated successfully!",
                ));
                Some(self.refresh().await.unwrap_or(notice))
            }
            Err(e) if e.is_unauthorized() => self.expire(epoch),
            Err(e) => {
                error!("Error generating token: {e}");
                Some(self.notify(Notice::error(
                    NoticeScope::Generate,
                    "Failed to generate token.",
                )))
            }
        }
    }

    /// Ask the server whether `token` is a valid, active token.
    pub async fn check(&self, token: &str) -> Notice {
        let token = token.trim();
        if token.is_empty() {
            return self.notify(Notice::error(NoticeScope::Check, "Please enter a token."));
        }
        self.update(|s| s.clear_notice(NoticeScope::Check));
        match self.api.check_token(token).await {
            Ok(true) => self.notify(Notice::success(NoticeScope::Check, "Token is valid.")),
            Ok(false) => self.notify(Notice::info(
                NoticeScope::Check,
                "Token is invalid or inactive.",
            )),
            Err(e) => {
                error!("Error checking token: {e}");
                self.notify(Notice::error(NoticeScope::Check, "Failed to check token."))
            }
        }
    }

    /// Switch between light and dark and remember the choice.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.update(|s| {
            let theme = s.theme().toggled();
            s.set_theme(theme);
            theme
        });
        theme.save(&self.store, &self.config.theme_key);
        debug!("Theme set to {theme}");
        theme
    }
}
