//! View model of the token table, independent of how it is drawn.

use crate::session::{Session, TableState};
use time::{format_description::well_known::Rfc3339, macros::format_description};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use token_console_dto::token::{TokenId, TokenRecord};

pub const COLUMNS: [&str; 5] = ["ID", "Token", "Status", "Created At", "Actions"];
pub const LOADING_TEXT: &str = "Loading tokens...";
pub const EMPTY_TEXT: &str = "No tokens found.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRow {
    pub id: TokenId,
    pub token: String,
    pub status: &'static str,
    pub created_at: String,
    /// Label of the status action.
    pub toggle_label: &'static str,
    /// Active flag the status action requests.
    pub toggle_to: bool,
    /// An update or delete for this token is in flight.
    pub busy: bool,
}

impl TokenRow {
    pub fn new(record: &TokenRecord, busy: bool, format_time: &impl Fn(&str) -> String) -> Self {
        Self {
            id: record.id,
            token: record.token.clone(),
            status: if record.is_active { "Active" } else { "Inactive" },
            created_at: format_time(&record.created_at),
            toggle_label: if record.is_active {
                "Deactivate"
            } else {
                "Activate"
            },
            toggle_to: !record.is_active,
            busy,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableBody {
    /// A single full-width row with a message.
    Placeholder(&'static str),
    Rows(Vec<TokenRow>),
    /// No rows at all.
    Empty,
}

impl TableBody {
    /// Number of `<tr>` elements the body renders.
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Placeholder(_) => 1,
            TableBody::Rows(rows) => rows.len(),
            TableBody::Empty => 0,
        }
    }
}

pub fn rows(
    tokens: &[TokenRecord],
    is_pending: impl Fn(TokenId) -> bool,
    format_time: impl Fn(&str) -> String,
) -> TableBody {
    if tokens.is_empty() {
        return TableBody::Placeholder(EMPTY_TEXT);
    }
    TableBody::Rows(
        tokens
            .iter()
            .map(|record| TokenRow::new(record, is_pending(record.id), &format_time))
            .collect(),
    )
}

pub fn table_body(session: &Session, format_time: impl Fn(&str) -> String) -> TableBody {
    match session.table() {
        TableState::Idle | TableState::Failed => TableBody::Empty,
        TableState::Loading => TableBody::Placeholder(LOADING_TEXT),
        TableState::Loaded(tokens) => rows(tokens, |id| session.is_pending(id), format_time),
    }
}

/// Render a server timestamp as `YYYY-MM-DD HH:MM:SS`, in UTC when the
/// timestamp carries an offset. Unparseable input is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(t) = OffsetDateTime::parse(raw, &Rfc3339) {
        if let Ok(s) = t
            .to_offset(UtcOffset::UTC)
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        {
            return format!("{s} UTC");
        }
    }
    // Naive timestamps, with or without fractional seconds.
    let whole_seconds = raw.split('.').next().unwrap_or(raw);
    if let Ok(t) = PrimitiveDateTime::parse(
        whole_seconds,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        if let Ok(s) = t.format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        )) {
            return s;
        }
    }
    raw.to_string()
}
