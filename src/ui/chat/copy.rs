//! Fixed widget copy.

/// Header title.
pub const TITLE: &str = "DR HIRO - Your Cryptocurrency Chatbot 🤖";

/// Sidebar introduction.
pub const ABOUT: &str = "DR HIRO is your expert cryptocurrency assistant, providing up-to-date \
                         information on prices, trends, and news.";

/// Message field placeholder.
pub const PLACEHOLDER: &str = "What would you like to know about cryptocurrencies?";

/// Usage tips shown in the sidebar.
pub const TIPS: [&str; 4] = [
    "For live data, ask about current prices or market caps.",
    "For historical data, specify a date in your query.",
    "For news, mention 'news' or 'latest updates' in your query.",
    "For general information, ask about concepts, technologies, or history.",
];
