//! HTML rendering for the wallet page.

use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    alert::Alert,
    api::{Transaction, TransactionKind},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_ROW_STYLE, base},
    money::{Amount, format_brl},
    navigation::NavBar,
    wallet::balance,
};

/// The message shown in place of the table when the user has no transactions.
pub(crate) const EMPTY_TRANSACTIONS_MSG: &str = "Não há registros de entrada ou saída";

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Transaction dates are shown as day and month only.
const DATE_LABEL_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[day]/[month]");

fn kind_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "text-green-700 dark:text-green-300",
        TransactionKind::Outcome => "text-red-700 dark:text-red-300",
    }
}

fn total_class(total: Amount) -> &'static str {
    if total.is_negative() {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

/// Render the wallet page.
///
/// `transactions` is `None` when the transactions could not be fetched from
/// the wallet API, in which case the page shows `alert` instead of the table.
pub(crate) fn wallet_view(transactions: Option<&[Transaction]>, alert: Option<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::WALLET_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full sm:max-w-2xl" id="wallet-content"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Carteira" }
                }

                @if let Some(alert) = alert {
                    (alert.into_inline_html())
                }

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
                {
                    @match transactions {
                        Some([]) => {
                            p
                                data-empty-state="true"
                                class="px-6 py-8 text-center text-gray-500 dark:text-gray-400"
                            {
                                (EMPTY_TRANSACTIONS_MSG)
                            }
                        }
                        Some(transactions) => {
                            (transactions_table(transactions))
                        }
                        None => {
                            div data-transactions-pending="true" {}
                        }
                    }
                }

                div class="flex gap-4"
                {
                    a
                        href=(endpoints::NEW_INCOME_VIEW)
                        class=(BUTTON_PRIMARY_STYLE)
                        data-new-income="true"
                    {
                        "Nova entrada"
                    }

                    a
                        href=(endpoints::NEW_OUTCOME_VIEW)
                        class=(BUTTON_PRIMARY_STYLE)
                        data-new-outcome="true"
                    {
                        "Nova saída"
                    }
                }
            }
        }
    };

    base("Carteira", &content)
}

fn transactions_table(transactions: &[Transaction]) -> Markup {
    let total = balance(transactions);

    html! {
        table class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            tbody
            {
                @for transaction in transactions {
                    (transaction_row_view(transaction))
                }

                tr class=(TABLE_ROW_STYLE) data-total-row="true"
                {
                    td class={ (TABLE_CELL_STYLE) " text-gray-400 dark:text-gray-500" } {}

                    td class={ (TABLE_CELL_STYLE) " font-bold text-gray-900 dark:text-white" }
                    {
                        "SALDO"
                    }

                    td class={ (TABLE_CELL_STYLE) " text-right tabular-nums " (total_class(total)) }
                    {
                        (format_brl(total.abs()))
                    }
                }
            }
        }
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (description, tooltip) = format_description_text(&transaction.description);
    let date_label = transaction
        .date
        .format(DATE_LABEL_FORMAT)
        .unwrap_or_else(|_| transaction.date.to_string());

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class={ (TABLE_CELL_STYLE) " text-gray-400 dark:text-gray-500 whitespace-nowrap" }
            {
                (date_label)
            }

            td class={ (TABLE_CELL_STYLE) " text-gray-900 dark:text-white" } title=[tooltip]
            {
                (description)
            }

            td class={ (TABLE_CELL_STYLE) " text-right tabular-nums " (kind_class(transaction.kind)) }
            {
                (format_brl(transaction.value))
            }
        }
    }
}

fn format_description_text(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}
