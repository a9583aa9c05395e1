//! Native select component.

use leptos::prelude::*;

/// One `<option>` of a [`Select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Dropdown that posts its value on change.
#[component]
pub fn Select(
    /// Element ID, referenced by the label.
    id: &'static str,
    /// Form field name.
    name: &'static str,
    /// Choices in display order.
    options: Vec<SelectOption>,
    /// Currently selected value.
    selected: &'static str,
    /// URL the new value is posted to.
    #[prop(into)]
    hx_post: String,
    /// Additional CSS classes.
    #[prop(into, default = String::new())]
    class: String,
) -> impl IntoView {
    let classes = format!(
        "flex h-10 w-full items-center rounded-lg border px-3 py-2 text-sm \
         focus:outline-none focus:ring-2 focus:ring-blue-500 {}",
        class
    );

    view! {
        <select id=id name=name class=classes hx-post=hx_post hx-trigger="change">
            {options
                .into_iter()
                .map(|opt| {
                    let is_selected = opt.value == selected;
                    view! {
                        <option value=opt.value selected=is_selected>
                            {opt.label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
