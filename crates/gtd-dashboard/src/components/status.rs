//! Loading and error placeholders for fetched data.

use leptos::prelude::*;

use crate::services::Fetched;

/// Spinner while `state` is pending, the message if it failed, nothing once loaded.
pub fn fetch_status<T: Send + Sync + 'static>(state: Fetched<T>) -> impl IntoView {
    move || {
        let error = state.with(|s| s.as_ref().map(|r| r.as_ref().err().cloned()));
        match error {
            None => Some(
                view! {
                    <div class="fetch-status">
                        <div class="spinner"></div>
                        <span class="text-muted">"Loading..."</span>
                    </div>
                }
                .into_any(),
            ),
            Some(Some(message)) => Some(
                view! { <div class="fetch-status error">{message}</div> }.into_any(),
            ),
            Some(None) => None,
        }
    }
}
