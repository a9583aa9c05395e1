//! Text input component.

use leptos::prelude::*;

/// Single-line text input.
///
/// `hx_post`/`hx_trigger` let the field report its value without swapping
/// anything; the field itself is preserved across widget swaps.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <TextInput
///         id="chat-input"
///         name="message"
///         placeholder="Type your message..."
///         value=draft
///     />
/// }
/// ```
#[component]
pub fn TextInput(
    /// Input ID attribute (required for preservation across swaps).
    id: &'static str,
    /// Input name attribute.
    name: &'static str,
    /// Placeholder text.
    #[prop(default = "")]
    placeholder: &'static str,
    /// Current value.
    #[prop(into, default = String::new())]
    value: String,
    /// Optional URL the value is posted to as it changes.
    #[prop(optional, into)]
    hx_post: Option<String>,
    /// Trigger spec used with `hx_post`.
    #[prop(default = "input changed delay:200ms")]
    hx_trigger: &'static str,
    /// Additional CSS classes.
    #[prop(into, default = String::new())]
    class: String,
) -> impl IntoView {
    let base_classes = "flex h-10 w-full rounded-lg border px-3 py-2 text-sm \
                        focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-blue-500 \
                        disabled:cursor-not-allowed disabled:opacity-50";

    let classes = format!("{} {}", base_classes, class);
    let trigger = hx_post.as_ref().map(|_| hx_trigger);

    view! {
        <input
            type="text"
            id=id
            name=name
            class=classes
            placeholder=placeholder
            value=value
            autocomplete="off"
            hx-post=hx_post
            hx-trigger=trigger
            hx-swap=trigger.map(|_| "none")
            hx-preserve="true"
        />
    }
}
