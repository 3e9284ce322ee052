//! The alert component for displaying error and success messages to users.
//!
//! Alerts are rendered either inline as part of a full page, or as an
//! out-of-band htmx swap targeting the `#alert-container` element that the
//! base layout places on every page.

use maud::{Markup, html};

/// An alert message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// An error with a headline and an explanation.
    Error {
        /// The headline of the alert.
        message: String,
        /// Detail text explaining the error.
        details: String,
    },
    /// An error with a headline only.
    ErrorSimple {
        /// The headline of the alert.
        message: String,
    },
}

impl Alert {
    /// Create an error alert with detail text.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create an error alert without detail text.
    pub fn error_simple(message: &str) -> Self {
        Self::ErrorSimple {
            message: message.to_owned(),
        }
    }

    /// Render the alert for an out-of-band htmx swap into `#alert-container`.
    pub fn into_html(self) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                (self.into_inline_html())
            }
        }
    }

    /// Render the alert for embedding directly in page content.
    pub fn into_inline_html(self) -> Markup {
        let (message, details, class) = match self {
            Alert::Error { message, details } => (message, Some(details), ERROR_ALERT_STYLE),
            Alert::ErrorSimple { message } => (message, None, ERROR_ALERT_STYLE),
        };

        html! {
            div role="alert" class=(class) data-alert="true"
            {
                p class="font-medium" { (message) }

                @if let Some(details) = details {
                    p class="text-sm" { (details) }
                }
            }
        }
    }
}

const ERROR_ALERT_STYLE: &str = "p-4 mb-4 rounded-lg border border-red-300 \
    bg-red-50 text-red-800 dark:bg-gray-800 dark:text-red-400 \
    dark:border-red-800";

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn out_of_band_alert_targets_alert_container() {
        let markup = Alert::error_simple("Servidor offline").into_html();

        let fragment = Html::parse_fragment(&markup.into_string());
        let selector = Selector::parse("div#alert-container[hx-swap-oob]").unwrap();

        assert_eq!(fragment.select(&selector).count(), 1);
    }

    #[test]
    fn inline_alert_shows_message_and_details() {
        let markup = Alert::error("Algo deu errado", "Tente novamente").into_inline_html();

        let fragment = Html::parse_fragment(&markup.into_string());
        let selector = Selector::parse("div[data-alert] p").unwrap();
        let paragraphs: Vec<String> = fragment
            .select(&selector)
            .map(|p| p.text().collect::<String>())
            .collect();

        assert_eq!(paragraphs, vec!["Algo deu errado", "Tente novamente"]);
    }
}
