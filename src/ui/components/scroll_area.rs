//! Scrollable area component.

use leptos::prelude::*;

/// Scrollable container component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <ScrollArea class="h-[calc(100vh-13rem)] px-4">
///         // Long content here
///     </ScrollArea>
/// }
/// ```
#[component]
pub fn ScrollArea(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Scrollable content.
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "relative overflow-auto scrollbar-thin scrollbar-track-transparent {}",
        class
    );

    view! {
        <div class=classes>
            {children()}
        </div>
    }
}
