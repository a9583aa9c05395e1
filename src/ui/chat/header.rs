//! Chat header component.

use leptos::prelude::*;

use super::copy::TITLE;
use crate::chat::Theme;
use crate::ui::components::{ActionButton, ButtonVariant, ChevronRightIcon, MoonIcon, SunIcon};
use crate::ui::palette::Palette;
use crate::ui::urls::SessionUrls;

/// Title bar with the sidebar reopen control and the theme toggle.
///
/// The toggle shows the sun while dark and the moon while light, i.e. the
/// theme it switches to.
#[component]
pub fn ChatHeader(
    urls: SessionUrls,
    sidebar_open: bool,
    theme: Theme,
    palette: Palette,
) -> impl IntoView {
    let classes = format!(
        "flex flex-wrap justify-between items-center p-4 border-b {}",
        palette.panel
    );
    let reopen = (!sidebar_open).then(|| {
        view! {
            <ActionButton action=urls.toggle_sidebar() label="Open sidebar" class="mr-2">
                <ChevronRightIcon/>
            </ActionButton>
        }
    });
    let icon = if theme.is_dark() {
        view! { <SunIcon/> }.into_any()
    } else {
        view! { <MoonIcon/> }.into_any()
    };

    view! {
        <header class=classes>
            <div class="flex items-center">
                {reopen}
                <h1 class="text-lg sm:text-xl font-bold">{TITLE}</h1>
            </div>
            <ActionButton
                action=urls.toggle_theme()
                variant=ButtonVariant::Outline
                label="Toggle theme"
                class=palette.toggle
            >
                {icon}
            </ActionButton>
        </header>
    }
}
