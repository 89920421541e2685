//! Alerts for displaying error messages to users.
//!
//! Alerts are HTML fragments that HTMX swaps into the `#alert-container`
//! element that [crate::html::base] places on every page.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A message shown to the user after a failed HTMX request.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// A short summary of what went wrong.
    pub message: String,
    /// What the user can do about it, omitted when empty.
    pub details: String,
}

impl Alert {
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    fn into_markup(self) -> Markup {
        let Alert { message, details } = self;

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div
                id="alert"
                role="alert"
                class=(ERROR_STYLE)
            {
                div class="flex items-center justify-between"
                {
                    span class="font-semibold" { (message) }

                    button
                        type="button"
                        aria-label="Close"
                        class="ms-4 font-bold"
                        onclick="this.closest('#alert').remove()"
                    {
                        "×"
                    }
                }

                @if !details.is_empty() {
                    p class="mt-1" { (details) }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800";
