//! Button component with variants and sizes.

use leptos::prelude::*;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button (send).
    #[default]
    Primary,
    /// Subtle ghost button (sidebar open/close).
    Ghost,
    /// Destructive action button (clear chat).
    Destructive,
    /// Outline button (theme toggle).
    Outline,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "text-white",
            Self::Ghost => "bg-transparent hover:bg-gray-700 hover:text-gray-100",
            Self::Destructive => "bg-red-600 text-white hover:bg-red-700",
            Self::Outline => "border",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Small button.
    Sm,
    /// Medium button (default).
    #[default]
    Md,
    /// Icon-only button.
    Icon,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "h-8 px-3 text-xs",
            Self::Md => "h-10 px-4 text-sm",
            Self::Icon => "h-10 w-10",
        }
    }
}

fn button_classes(variant: ButtonVariant, size: ButtonSize, class: &str) -> String {
    let base_classes = "inline-flex items-center justify-center rounded-lg font-medium \
                        transition-colors focus-visible:outline-none focus-visible:ring-2 \
                        focus-visible:ring-offset-2 disabled:pointer-events-none disabled:opacity-50";

    format!(
        "{} {} {} {}",
        base_classes,
        variant.classes(),
        size.classes(),
        class
    )
}

/// ShadCN-style button component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button variant=ButtonVariant::Primary button_type="submit">
///         "Send"
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Md)]
    size: ButtonSize,
    /// Whether the button is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Accessible label for icon-only buttons.
    #[prop(default = "")]
    label: &'static str,
    /// Additional CSS classes.
    #[prop(into, default = String::new())]
    class: String,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let classes = button_classes(variant, size, &class);
    let label = (!label.is_empty()).then_some(label);

    view! {
        <button type=button_type class=classes disabled=disabled aria-label=label>
            {children()}
        </button>
    }
}

/// A button that posts to `action` and swaps the widget with the response.
///
/// Rendered as a one-button form so it works through HTMX without any
/// element-level scripting.
#[component]
pub fn ActionButton(
    /// URL the click posts to.
    #[prop(into)]
    action: String,
    /// Button variant.
    #[prop(default = ButtonVariant::Ghost)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Icon)]
    size: ButtonSize,
    /// Accessible label.
    #[prop(default = "")]
    label: &'static str,
    /// Additional CSS classes for the button.
    #[prop(into, default = String::new())]
    class: String,
    /// Button content.
    children: Children,
) -> impl IntoView {
    view! {
        <form class="contents" hx-post=action>
            <Button variant=variant size=size button_type="submit" label=label class=class>
                {children()}
            </Button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_combine_variant_size_and_extra() {
        let classes = button_classes(ButtonVariant::Destructive, ButtonSize::Sm, "mt-4");
        assert!(classes.contains("bg-red-600"));
        assert!(classes.contains("h-8 px-3"));
        assert!(classes.ends_with("mt-4"));
    }
}
