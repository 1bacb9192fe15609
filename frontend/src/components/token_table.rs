use crate::components::CopyButton;
use patternfly_yew::prelude::*;
use token_console_common::table::{TableBody, TokenRow, COLUMNS};
use token_console_dto::token::TokenId;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TokenTableProps {
    pub body: TableBody,
    /// Token id and the active flag to request.
    pub on_toggle: Callback<(TokenId, bool)>,
    pub on_delete: Callback<TokenId>,
}

#[function_component(TokenTable)]
pub fn token_table(props: &TokenTableProps) -> Html {
    let body = match &props.body {
        TableBody::Placeholder(text) => html! {
            <tr role="row"><td role="gridcell" colspan={COLUMNS.len().to_string()}>{*text}</td></tr>
        },
        TableBody::Rows(rows) => rows
            .iter()
            .map(|row| token_row(row, &props.on_toggle, &props.on_delete))
            .collect::<Html>(),
        TableBody::Empty => html! {},
    };

    html! {
        <table id="tokens-table" class="pf-v5-c-table pf-m-grid-md" role="grid">
            <thead class="pf-v5-c-table__thead">
                <tr role="row">
                    { for COLUMNS.iter().map(|c| html! { <th role="columnheader">{*c}</th> }) }
                </tr>
            </thead>
            <tbody class="pf-v5-c-table__tbody">{ body }</tbody>
        </table>
    }
}

fn token_row(row: &TokenRow, on_toggle: &Callback<(TokenId, bool)>, on_delete: &Callback<TokenId>) -> Html {
    let toggle = {
        let on_toggle = on_toggle.clone();
        let (id, to) = (row.id, row.toggle_to);
        Callback::from(move |_: MouseEvent| on_toggle.emit((id, to)))
    };
    let delete = {
        let on_delete = on_delete.clone();
        let id = row.id;
        Callback::from(move |_: MouseEvent| on_delete.emit(id))
    };
    let status_class = if row.toggle_to {
        "token-status inactive"
    } else {
        "token-status active"
    };

    html! {
        <tr role="row" key={row.id.to_string()}>
            <td role="gridcell" data-label="ID">{row.id}</td>
            <td role="gridcell" data-label="Token">
                <code>{row.token.clone()}</code>
                <CopyButton text={row.token.clone()} />
            </td>
            <td role="gridcell" data-label="Status"><span class={status_class}>{row.status}</span></td>
            <td role="gridcell" data-label="Created At">{row.created_at.clone()}</td>
            <td role="gridcell" data-label="Actions">
                <Button
                    class="action-button toggle-status"
                    variant={ButtonVariant::Secondary}
                    label={row.toggle_label}
                    disabled={row.busy}
                    onclick={toggle}
                />
                {" "}
                <Button
                    class="action-button delete"
                    variant={ButtonVariant::Danger}
                    label="Delete"
                    disabled={row.busy}
                    onclick={delete}
                />
            </td>
        </tr>
    }
}
