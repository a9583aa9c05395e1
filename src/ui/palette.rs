//! Theme-dependent class sets.

use crate::chat::Theme;

/// Tailwind classes for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Widget root (page background and text).
    pub root: &'static str,
    /// Sidebar, header and footer panels.
    pub panel: &'static str,
    /// Message list background.
    pub main: &'static str,
    /// Text fields and selects.
    pub field: &'static str,
    /// Tips card.
    pub card: &'static str,
    pub user_bubble: &'static str,
    pub bot_bubble: &'static str,
    /// Theme toggle button.
    pub toggle: &'static str,
    /// Send button.
    pub send: &'static str,
}

const LIGHT: Palette = Palette {
    root: "bg-gray-100 text-gray-900",
    panel: "bg-white border-gray-200",
    main: "bg-gray-50",
    field: "bg-gray-50 border-gray-300 text-gray-900",
    card: "bg-gray-100",
    user_bubble: "bg-blue-100 text-blue-900",
    bot_bubble: "bg-white text-gray-900",
    toggle: "bg-gray-100 hover:bg-gray-200",
    send: "bg-blue-500 hover:bg-blue-600",
};

const DARK: Palette = Palette {
    root: "bg-[#121212] text-gray-200",
    panel: "bg-[#1E1E1E] border-gray-700",
    main: "bg-[#121212]",
    field: "bg-gray-800 border-gray-700 text-gray-200",
    card: "bg-gray-800",
    user_bubble: "bg-blue-600 text-white",
    bot_bubble: "bg-gray-800 text-gray-200",
    toggle: "bg-gray-800 hover:bg-gray-700",
    send: "bg-blue-600 hover:bg-blue-700",
};

impl Palette {
    #[must_use]
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}
