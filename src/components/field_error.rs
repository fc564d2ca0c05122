//! Field Error Component

use leptos::prelude::*;
use todo_client::{Field, FieldErrors};

/// Inline message for the first failed rule of `field`
///
/// Nothing is rendered until `show` turns true, so an untouched form stays quiet.
#[component]
pub fn FieldError(
    #[prop(into)] errors: Signal<Option<FieldErrors>>,
    field: Field,
    #[prop(into)] show: Signal<bool>,
) -> impl IntoView {
    move || {
        if !show.get() {
            return None;
        }
        errors
            .with(|errors| {
                errors
                    .as_ref()
                    .and_then(|errors| errors.message(field))
                    .map(str::to_string)
            })
            .map(|message| view! { <span class="field-error">{message}</span> })
    }
}
