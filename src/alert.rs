//! Alerts for displaying error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element of the base page
//! by HTMX when a request fails.

use axum::response::Html;
use maud::{Markup, html};

/// An error message with optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    message: String,
    details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_markup(self) -> Markup {
        html!(
            div
                role="alert"
                class="flex items-start p-4 mb-4 text-red-800 rounded-lg
                    bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow"
            {
                div class="ms-3 text-sm"
                {
                    span class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex
                        items-center justify-center h-8 w-8 hover:bg-red-200
                        dark:hover:bg-gray-700"
                    aria-label="Fechar"
                    onclick="this.closest('#alert-container').classList.add('hidden')"
                {
                    "×"
                }
            }

            script { "document.getElementById('alert-container').classList.remove('hidden');" }
        )
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}
