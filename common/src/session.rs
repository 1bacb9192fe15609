use crate::{
    notice::{Notice, NoticeScope},
    theme::Theme,
};
use std::collections::{BTreeMap, BTreeSet};
use strum::Display;
use token_console_dto::{
    session::Credential,
    token::{TokenId, TokenRecord},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum View {
    #[default]
    Login,
    Admin,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TableState {
    /// Nothing requested yet, or the session ended.
    #[default]
    Idle,
    Loading,
    Loaded(Vec<TokenRecord>),
    /// The last load failed; the table is cleared.
    Failed,
}

/// Everything the console knows about the current operator session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    credential: Option<Credential>,
    view: View,
    theme: Theme,
    table: TableState,
    generated: Option<String>,
    notices: BTreeMap<NoticeScope, Notice>,
    pending: BTreeSet<TokenId>,
    list_generation: u64,
    epoch: u64,
    restoring: bool,
}

impl Session {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Token value from the last successful generate, shown for copying.
    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    pub fn notice(&self, scope: NoticeScope) -> Option<&Notice> {
        self.notices.get(&scope)
    }

    pub fn is_pending(&self, id: TokenId) -> bool {
        self.pending.contains(&id)
    }

    /// Changes whenever an operator signs in or out. Work started under an
    /// older epoch must not touch the session.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True while a stored credential is being verified on load.
    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    pub(crate) fn set_restoring(&mut self, restoring: bool) {
        self.restoring = restoring;
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub(crate) fn authenticate(&mut self, credential: Credential) {
        self.credential = Some(credential);
        self.view = View::Admin;
        self.epoch += 1;
    }

    /// Drop the credential and everything derived from it. Outstanding list
    /// loads are invalidated so a late response cannot repopulate the table.
    pub(crate) fn sign_out(&mut self) {
        self.credential = None;
        self.view = View::Login;
        self.table = TableState::Idle;
        self.generated = None;
        self.pending.clear();
        self.notices.retain(|scope, _| *scope == NoticeScope::Auth);
        self.list_generation += 1;
        self.epoch += 1;
    }

    /// Start a list load and return its generation.
    pub(crate) fn begin_list(&mut self) -> u64 {
        self.list_generation += 1;
        self.table = TableState::Loading;
        self.list_generation
    }

    /// Store the outcome of a list load. Returns false, leaving the table
    /// alone, when a newer load has been started since `generation`.
    pub(crate) fn finish_list(&mut self, generation: u64, tokens: Option<Vec<TokenRecord>>) -> bool {
        if generation != self.list_generation {
            return false;
        }
        self.table = match tokens {
            Some(tokens) => TableState::Loaded(tokens),
            None => TableState::Failed,
        };
        true
    }

    pub(crate) fn is_current_list(&self, generation: u64) -> bool {
        generation == self.list_generation
    }

    /// Mark `id` busy. False when an operation on it is already in flight.
    pub(crate) fn reserve(&mut self, id: TokenId) -> bool {
        self.pending.insert(id)
    }

    pub(crate) fn release(&mut self, id: TokenId) {
        self.pending.remove(&id);
    }

    pub(crate) fn set_generated(&mut self, token: Option<String>) {
        self.generated = token;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notices.insert(notice.scope, notice);
    }

    pub(crate) fn clear_notice(&mut self, scope: NoticeScope) {
        self.notices.remove(&scope);
    }
}
