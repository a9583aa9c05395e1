//! Chat widget layout components.
//!
//! The widget is rendered as one fragment rooted at `#chat-widget`. Every
//! control posts to a session endpoint and the response replaces the whole
//! fragment, so these components only ever render a [`Snapshot`].
//!
//! [`Snapshot`]: crate::dispatch::Snapshot

mod copy;
mod header;
mod input_form;
mod message_list;
mod shell;
mod sidebar;

pub use copy::{ABOUT, PLACEHOLDER, TIPS, TITLE};
pub use header::ChatHeader;
pub use input_form::InputForm;
pub use message_list::{MessageBubble, MessageList, TypingIndicator};
pub use shell::ChatWidget;
pub use sidebar::Sidebar;
