//! Defines the route handlers for the pages that display the new transaction form.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    api::TransactionKind,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
        loading_spinner,
    },
    navigation::NavBar,
};

fn page_title(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Nova entrada",
        TransactionKind::Outcome => "Nova saída",
    }
}

fn new_transaction_form(kind: TransactionKind) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#value, #description, #submit-button"
            class="space-y-4 md:space-y-6 w-full sm:max-w-md"
        {
            input type="hidden" name="kind" value=(kind.as_str());

            div
            {
                label for="value" class=(FORM_LABEL_STYLE) { "Valor" }

                input
                    type="text"
                    inputmode="decimal"
                    name="value"
                    id="value"
                    placeholder="R$ 0,00"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Descrição" }

                input
                    type="text"
                    name="description"
                    id="description"
                    placeholder="Descrição"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Salvar"
            }
        }
    }
}

fn new_transaction_view(kind: TransactionKind, active_endpoint: &str) -> Markup {
    let title = page_title(kind);
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full sm:max-w-md"
            {
                h1 class="text-xl font-bold" { (title) }

                (new_transaction_form(kind))
            }
        }
    };

    base(title, &content)
}

/// Display the page for recording a new income.
pub async fn get_new_income_page() -> Response {
    new_transaction_view(TransactionKind::Income, endpoints::NEW_INCOME_VIEW).into_response()
}

/// Display the page for recording a new outcome.
pub async fn get_new_outcome_page() -> Response {
    new_transaction_view(TransactionKind::Outcome, endpoints::NEW_OUTCOME_VIEW).into_response()
}
