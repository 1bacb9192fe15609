//! Console flows against a scripted, in-memory token API.

use async_trait::async_trait;
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};
use token_console_common::{
    api::{Endpoint, TokenApi},
    config::ConsoleConfig,
    console::AUTH_EXPIRED,
    error::ApiError,
    notice::{NoticeLevel, NoticeScope},
    session::{TableState, View},
    storage::{KeyValueStore, MemoryStore},
    table::{table_body, TableBody},
    theme::Theme,
    Console,
};
use token_console_dto::{
    session::{Credential, LoginForm},
    token::{GeneratedToken, TokenId, TokenRecord, TokenUpdate},
};

struct FakeApi {
    accepted: RefCell<Credential>,
    tokens: RefCell<Vec<TokenRecord>>,
    /// Scripted list responses, consumed before falling back to `tokens`.
    list_responses: RefCell<VecDeque<Vec<TokenRecord>>>,
    /// Yields before answering, one entry per call; missing means none.
    delays: RefCell<VecDeque<usize>>,
    fail_next: RefCell<Option<ApiError>>,
    calls: RefCell<Vec<Endpoint>>,
    updates: RefCell<Vec<(TokenId, TokenUpdate)>>,
    next_id: Cell<TokenId>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            accepted: RefCell::new(Credential::encode("admin", "secret")),
            tokens: RefCell::new(Vec::new()),
            list_responses: RefCell::new(VecDeque::new()),
            delays: RefCell::new(VecDeque::new()),
            fail_next: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
            updates: RefCell::new(Vec::new()),
            next_id: Cell::new(100),
        }
    }

    fn with_tokens(tokens: Vec<TokenRecord>) -> Self {
        let api = Self::new();
        *api.tokens.borrow_mut() = tokens;
        api
    }

    fn count(&self, matches: impl Fn(&Endpoint) -> bool) -> usize {
        self.calls.borrow().iter().filter(|e| matches(e)).count()
    }

    fn list_calls(&self) -> usize {
        self.count(|e| *e == Endpoint::ListTokens)
    }

    fn rotate_password(&self) {
        *self.accepted.borrow_mut() = Credential::encode("admin", "rotated");
    }

    async fn enter(&self, endpoint: Endpoint, credential: Option<&Credential>) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(endpoint);
        let delay = self.delays.borrow_mut().pop_front().unwrap_or(0);
        for _ in 0..delay {
            tokio::task::yield_now().await;
        }
        if let Some(err) = self.fail_next.borrow_mut().take() {
            return Err(err);
        }
        match credential {
            Some(c) if *c != *self.accepted.borrow() => Err(ApiError::Unauthorized {
                detail: Some("Incorrect username or password".into()),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl TokenApi for FakeApi {
    async fn list_tokens(&self, credential: &Credential) -> Result<Vec<TokenRecord>, ApiError> {
        let scripted = self.list_responses.borrow_mut().pop_front();
        self.enter(Endpoint::ListTokens, Some(credential)).await?;
        Ok(scripted.unwrap_or_else(|| self.tokens.borrow().clone()))
    }

    async fn generate_token(&self, credential: &Credential) -> Result<GeneratedToken, ApiError> {
        self.enter(Endpoint::GenerateToken, Some(credential)).await?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let token = format!("generated-{id}");
        self.tokens.borrow_mut().push(record(id, &token, true));
        Ok(GeneratedToken {
            token,
            id: Some(id),
        })
    }

    async fn update_token(
        &self,
        credential: &Credential,
        id: TokenId,
        update: &TokenUpdate,
    ) -> Result<(), ApiError> {
        self.enter(Endpoint::UpdateToken(id), Some(credential)).await?;
        self.updates.borrow_mut().push((id, update.clone()));
        let mut tokens = self.tokens.borrow_mut();
        match tokens.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.is_active = update.is_active;
                Ok(())
            }
            None => Err(ApiError::Status {
                status: 404,
                detail: Some("Token not found".into()),
            }),
        }
    }

    async fn delete_token(&self, credential: &Credential, id: TokenId) -> Result<(), ApiError> {
        self.enter(Endpoint::DeleteToken(id), Some(credential)).await?;
        let mut tokens = self.tokens.borrow_mut();
        let before = tokens.len();
        tokens.retain(|t| t.id != id);
        if tokens.len() == before {
            return Err(ApiError::Status {
                status: 404,
                detail: Some("Token not found".into()),
            });
        }
        Ok(())
    }

    async fn check_token(&self, token: &str) -> Result<bool, ApiError> {
        self.enter(Endpoint::CheckToken, None).await?;
        Ok(self
            .tokens
            .borrow()
            .iter()
            .any(|t| t.token == token && t.is_active))
    }
}

fn record(id: TokenId, token: &str, is_active: bool) -> TokenRecord {
    TokenRecord {
        id,
        token: token.to_string(),
        is_active,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

fn form(password: &str) -> LoginForm {
    LoginForm {
        username: "admin".into(),
        password: password.into(),
        remember: true,
    }
}

fn console(api: FakeApi) -> Console<FakeApi, MemoryStore> {
    Console::new(api, MemoryStore::new(), ConsoleConfig::default())
}

async fn logged_in(api: FakeApi) -> Console<FakeApi, MemoryStore> {
    let console = console(api);
    console.login(&form("secret")).await;
    assert_eq!(console.snapshot().view(), View::Admin);
    console
}

fn stored_credential(console: &Console<FakeApi, MemoryStore>) -> Option<String> {
    console.store().get(&console.config().credential_key)
}

fn rows(console: &Console<FakeApi, MemoryStore>) -> TableBody {
    table_body(&console.snapshot(), |t| t.to_string())
}

#[tokio::test]
async fn login_opens_admin_view_with_one_list_load() {
    let console = console(FakeApi::with_tokens(vec![record(1, "abc", true)]));
    let notice = console.login(&form("secret")).await;

    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.text, "Login successful!");
    let session = console.snapshot();
    assert_eq!(session.view(), View::Admin);
    assert_eq!(session.table(), &TableState::Loaded(vec![record(1, "abc", true)]));
    assert_eq!(console.api().list_calls(), 1);
    assert_eq!(
        stored_credential(&console).as_deref(),
        Some(Credential::encode("admin", "secret").as_str())
    );
}

#[tokio::test]
async fn login_without_remember_stores_nothing() {
    let console = console(FakeApi::new());
    let mut form = form("secret");
    form.remember = false;
    console.login(&form).await;
    assert_eq!(console.snapshot().view(), View::Admin);
    assert_eq!(stored_credential(&console), None);
}

#[tokio::test]
async fn rejected_login_stays_on_login_view() {
    let console = console(FakeApi::new());
    let notice = console.login(&form("wrong")).await;

    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Incorrect username or password");
    let session = console.snapshot();
    assert_eq!(session.view(), View::Login);
    assert!(!session.is_authenticated());
    assert_eq!(stored_credential(&console), None);
}

#[tokio::test]
async fn login_failure_messages_fall_back() {
    let console = console(FakeApi::new());

    *console.api().fail_next.borrow_mut() = Some(ApiError::Status {
        status: 500,
        detail: None,
    });
    assert_eq!(console.login(&form("secret")).await.text, "Login failed.");

    *console.api().fail_next.borrow_mut() = Some(ApiError::Transport("offline".into()));
    assert_eq!(
        console.login(&form("secret")).await.text,
        "An error occurred during login."
    );
    assert_eq!(console.snapshot().view(), View::Login);
    assert_eq!(stored_credential(&console), None);
}

#[tokio::test]
async fn empty_username_is_rejected_locally() {
    let console = console(FakeApi::new());
    let notice = console.login(&LoginForm::default()).await;
    assert!(notice.is_error());
    assert_eq!(console.api().calls.borrow().len(), 0);
}

#[tokio::test]
async fn restore_uses_stored_credential() {
    let console = console(FakeApi::with_tokens(vec![record(1, "abc", true)]));
    console
        .store()
        .set(
            &console.config().credential_key,
            Credential::encode("admin", "secret").as_str(),
        )
        .unwrap();

    assert_eq!(console.restore().await, None);
    let session = console.snapshot();
    assert_eq!(session.view(), View::Admin);
    assert!(!session.is_restoring());
    assert_eq!(rows(&console).row_count(), 1);
    assert_eq!(console.api().list_calls(), 1);
}

#[tokio::test]
async fn restore_discards_rejected_credential() {
    let console = console(FakeApi::new());
    let key = console.config().credential_key.clone();
    console
        .store()
        .set(&key, Credential::encode("admin", "stale").as_str())
        .unwrap();

    console.restore().await;
    assert_eq!(console.snapshot().view(), View::Login);
    assert_eq!(stored_credential(&console), None);
}

#[tokio::test]
async fn restore_without_stored_credential_makes_no_request() {
    let console = console(FakeApi::new());
    console.restore().await;
    assert_eq!(console.snapshot().view(), View::Login);
    assert!(console.api().calls.borrow().is_empty());
}

#[tokio::test]
async fn logout_is_local() {
    let console = logged_in(FakeApi::new()).await;
    let calls = console.api().calls.borrow().len();

    console.logout();
    let session = console.snapshot();
    assert_eq!(session.view(), View::Login);
    assert!(!session.is_authenticated());
    assert_eq!(session.table(), &TableState::Idle);
    assert_eq!(stored_credential(&console), None);
    assert_eq!(console.api().calls.borrow().len(), calls);
}

#[tokio::test]
async fn empty_list_shows_placeholder() {
    let console = logged_in(FakeApi::new()).await;
    assert_eq!(rows(&console), TableBody::Placeholder("No tokens found."));
}

#[tokio::test]
async fn toggle_round_trip() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;

    let TableBody::Rows(before) = rows(&console) else {
        panic!("expected rows");
    };
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].status, "Active");
    assert_eq!(before[0].toggle_label, "Deactivate");

    let notice = console.set_active(1, before[0].toggle_to).await.unwrap();
    assert_eq!(notice.text, "Token 1 status updated to Inactive.");
    assert_eq!(
        console.api().updates.borrow().as_slice(),
        &[(1, TokenUpdate::set_active(false))]
    );
    assert_eq!(console.api().list_calls(), 2, "mutation re-fetches the list");

    let TableBody::Rows(after) = rows(&console) else {
        panic!("expected rows");
    };
    assert_eq!(after[0].status, "Inactive");
    assert_eq!(after[0].toggle_label, "Activate");

    console.set_active(1, after[0].toggle_to).await;
    let TableBody::Rows(again) = rows(&console) else {
        panic!("expected rows");
    };
    assert_eq!(again[0].status, "Active");
}

#[tokio::test]
async fn failed_toggle_keeps_last_table() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    let before = console.snapshot().table().clone();

    let notice = console.set_active(9, false).await.unwrap();
    assert_eq!(notice.text, "Failed to update token status.");
    assert_eq!(console.snapshot().table(), &before);
    assert_eq!(console.api().list_calls(), 1);
    assert_eq!(
        console.snapshot().notice(NoticeScope::Tokens),
        Some(&notice)
    );
}

#[tokio::test]
async fn cancelled_delete_sends_nothing() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    let mut asked = String::new();

    let notice = console
        .delete(1, |question| {
            asked = question.to_string();
            false
        })
        .await;

    assert_eq!(notice, None);
    assert_eq!(asked, "Are you sure you want to delete token ID 1?");
    assert_eq!(console.api().count(|e| matches!(e, Endpoint::DeleteToken(_))), 0);
    assert_eq!(rows(&console).row_count(), 1);
}

#[tokio::test]
async fn confirmed_delete_refreshes() {
    let console = logged_in(FakeApi::with_tokens(vec![
        record(1, "abc", true),
        record(2, "def", false),
    ]))
    .await;

    let notice = console.delete(1, |_| true).await.unwrap();
    assert_eq!(notice.text, "Token 1 deleted successfully.");
    let TableBody::Rows(left) = rows(&console) else {
        panic!("expected rows");
    };
    assert_eq!(left.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
}

#[tokio::test]
async fn failed_delete_keeps_row() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    *console.api().fail_next.borrow_mut() = Some(ApiError::Status {
        status: 500,
        detail: None,
    });
    let notice = console.delete(1, |_| true).await.unwrap();
    assert_eq!(notice.text, "Failed to delete token.");
    assert_eq!(rows(&console).row_count(), 1);
}

#[tokio::test]
async fn generate_shows_new_token_and_refreshes() {
    let console = logged_in(FakeApi::new()).await;
    let notice = console.generate().await.unwrap();

    assert_eq!(notice.text, "Token generated successfully!");
    let session = console.snapshot();
    assert_eq!(session.generated(), Some("generated-100"));
    assert_eq!(rows(&console).row_count(), 1);
    assert_eq!(console.api().list_calls(), 2);
}

#[tokio::test]
async fn generate_requires_login() {
    let console = console(FakeApi::new());
    let notice = console.generate().await.unwrap();
    assert_eq!(notice.text, "Please log in first.");
    assert!(console.api().calls.borrow().is_empty());
}

#[tokio::test]
async fn failed_generate_reports_error() {
    let console = logged_in(FakeApi::new()).await;
    *console.api().fail_next.borrow_mut() = Some(ApiError::Decode("eof".into()));
    let notice = console.generate().await.unwrap();
    assert_eq!(notice.text, "Failed to generate token.");
    assert_eq!(console.snapshot().generated(), None);
}

#[tokio::test]
async fn unauthorized_ends_session_from_any_operation() {
    for op in ["refresh", "toggle", "delete", "generate"] {
        let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
        console.api().rotate_password();

        let notice = match op {
            "refresh" => console.refresh().await,
            "toggle" => console.set_active(1, false).await,
            "delete" => console.delete(1, |_| true).await,
            _ => console.generate().await,
        }
        .unwrap();

        assert_eq!(notice.scope, NoticeScope::Auth, "{op}");
        assert_eq!(notice.text, AUTH_EXPIRED, "{op}");
        let session = console.snapshot();
        assert_eq!(session.view(), View::Login, "{op}");
        assert!(!session.is_authenticated(), "{op}");
        assert_eq!(stored_credential(&console), None, "{op}");
        assert_eq!(rows(&console), TableBody::Empty, "{op}");
    }
}

#[tokio::test]
async fn other_list_failures_clear_the_table() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    *console.api().fail_next.borrow_mut() = Some(ApiError::Status {
        status: 503,
        detail: None,
    });
    let notice = console.refresh().await.unwrap();
    assert_eq!(notice.text, "Failed to load tokens.");
    assert_eq!(console.snapshot().view(), View::Admin);
    assert_eq!(console.snapshot().table(), &TableState::Failed);
}

#[tokio::test]
async fn operations_on_the_same_token_are_serialized() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    console.api().delays.borrow_mut().push_back(2);

    let (first, second) = tokio::join!(console.set_active(1, false), console.set_active(1, false));

    assert_eq!(first.unwrap().level, NoticeLevel::Success);
    let second = second.unwrap();
    assert_eq!(second.level, NoticeLevel::Info);
    assert_eq!(second.text, "An operation on token 1 is already in progress.");
    assert_eq!(
        console.api().count(|e| matches!(e, Endpoint::UpdateToken(_))),
        1
    );
    assert!(!console.snapshot().is_pending(1));
}

#[tokio::test]
async fn busy_token_refuses_delete_without_asking() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    console.api().delays.borrow_mut().push_back(2);
    let asked = Cell::new(false);

    let (_, deleted) = tokio::join!(
        console.set_active(1, false),
        console.delete(1, |_| {
            asked.set(true);
            true
        })
    );

    assert!(deleted.unwrap().text.contains("already in progress"));
    assert!(!asked.get());
    assert_eq!(console.api().count(|e| matches!(e, Endpoint::DeleteToken(_))), 0);
}

#[tokio::test]
async fn rejection_from_ended_session_keeps_new_login() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    console.api().delays.borrow_mut().push_back(5);

    let (stale, relogin) = tokio::join!(console.set_active(1, false), async {
        console.logout();
        console.api().rotate_password();
        console.login(&form("rotated")).await
    });

    assert_eq!(relogin.text, "Login successful!");
    assert_eq!(stale, None);
    let session = console.snapshot();
    assert_eq!(session.view(), View::Admin);
    assert!(session.is_authenticated());
    assert_eq!(session.notice(NoticeScope::Auth), Some(&relogin));
    assert_eq!(
        stored_credential(&console).as_deref(),
        Some(Credential::encode("admin", "rotated").as_str())
    );
}

#[tokio::test]
async fn generate_from_ended_session_is_dropped() {
    let console = logged_in(FakeApi::new()).await;
    console.api().delays.borrow_mut().push_back(5);

    let (stale, _) = tokio::join!(console.generate(), async {
        console.logout();
        console.login(&form("secret")).await
    });

    assert_eq!(stale, None);
    let session = console.snapshot();
    assert_eq!(session.view(), View::Admin);
    assert_eq!(session.generated(), None);
    assert_eq!(session.notice(NoticeScope::Generate), None);
    assert_eq!(console.api().list_calls(), 2);
}

#[tokio::test]
async fn ended_session_does_not_release_new_reservation() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    console.api().delays.borrow_mut().extend([5, 0, 10]);
    let busy_after_stale = Cell::new(false);

    let (stale, fresh, _) = tokio::join!(
        console.set_active(1, false),
        async {
            console.logout();
            console.login(&form("secret")).await;
            console.set_active(1, true).await
        },
        async {
            for _ in 0..7 {
                tokio::task::yield_now().await;
            }
            busy_after_stale.set(console.snapshot().is_pending(1));
        }
    );

    assert_eq!(stale, None);
    assert!(busy_after_stale.get());
    assert_eq!(fresh.unwrap().text, "Token 1 status updated to Active.");
    assert!(!console.snapshot().is_pending(1));
}

#[tokio::test]
async fn slow_older_list_does_not_overwrite_newer() {
    let console = logged_in(FakeApi::new()).await;
    {
        let api = console.api();
        api.list_responses
            .borrow_mut()
            .extend([vec![record(1, "old", true)], vec![record(2, "new", true)]]);
        api.delays.borrow_mut().extend([3, 0]);
    }

    tokio::join!(console.refresh(), console.refresh());

    assert_eq!(
        console.snapshot().table(),
        &TableState::Loaded(vec![record(2, "new", true)])
    );
}

#[tokio::test]
async fn check_token_reports_validity() {
    let console = console(FakeApi::with_tokens(vec![
        record(1, "live", true),
        record(2, "dead", false),
    ]));

    assert_eq!(console.check("live").await.text, "Token is valid.");
    assert_eq!(
        console.check("dead").await.text,
        "Token is invalid or inactive."
    );
    assert_eq!(console.check("  ").await.text, "Please enter a token.");
    assert_eq!(console.api().count(|e| *e == Endpoint::CheckToken), 2);
}

#[tokio::test]
async fn theme_toggle_twice_restores_preference() {
    let console = console(FakeApi::new());
    let key = console.config().theme_key.clone();
    console.store().set(&key, "light").unwrap();

    assert_eq!(console.toggle_theme(), Theme::Dark);
    assert_eq!(console.store().get(&key).as_deref(), Some("dark"));
    assert_eq!(console.toggle_theme(), Theme::Light);
    assert_eq!(console.store().get(&key).as_deref(), Some("light"));
    assert_eq!(console.snapshot().theme(), Theme::Light);
    assert!(console.api().calls.borrow().is_empty());
}

#[tokio::test]
async fn stored_theme_is_loaded_on_start() {
    let store = MemoryStore::new();
    let config = ConsoleConfig::default();
    Theme::Dark.save(&store, &config.theme_key);
    let console = Console::new(FakeApi::new(), store, config);
    assert_eq!(console.snapshot().theme(), Theme::Dark);
}

#[tokio::test]
async fn observer_sees_loading_then_loaded() {
    let console = logged_in(FakeApi::with_tokens(vec![record(1, "abc", true)])).await;
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        console.subscribe(move |session| seen.borrow_mut().push(session.table().clone()));
    }

    console.refresh().await;
    let seen = seen.borrow();
    assert_eq!(seen.first(), Some(&TableState::Loading));
    assert_eq!(
        seen.last(),
        Some(&TableState::Loaded(vec![record(1, "abc", true)]))
    );
}
