//! Alerts for displaying success and error messages to users.
//!
//! Alerts are rendered into the page's `#alert-container`, either by
//! `hx-target-error` on a form or by an out-of-band swap.

use maud::{Markup, html};

/// A dismissible message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Green alert for completed actions.
    Success {
        /// The headline of the alert.
        message: String,
        /// Optional extra text, skipped when empty.
        details: String,
    },
    /// Red alert for failed actions.
    Error {
        /// The headline of the alert.
        message: String,
        /// Optional extra text, skipped when empty.
        details: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (message, details, container_style, title) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 border border-green-300 \
                dark:border-green-800",
                "Success",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 border border-red-300 \
                dark:border-red-800",
                "Error",
            ),
        };

        html! {
            div
                role="alert"
                class=(container_style)
                data-alert-kind=(title)
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        span class="font-semibold" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let alert = Alert::Error {
            message: "Could not update transaction".to_owned(),
            details: "The transaction could not be found.".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let alert = html
            .select(&Selector::parse("div[role=alert]").unwrap())
            .next()
            .expect("No alert found");
        assert_eq!(alert.value().attr("data-alert-kind"), Some("Error"));
        let text = alert.text().collect::<String>();
        assert!(text.contains("Could not update transaction"));
        assert!(text.contains("The transaction could not be found."));
    }

    #[test]
    fn empty_details_are_not_rendered() {
        let alert = Alert::Success {
            message: "Saved".to_owned(),
            details: String::new(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let paragraphs = html.select(&Selector::parse("p").unwrap()).count();
        assert_eq!(paragraphs, 0);
    }
}
