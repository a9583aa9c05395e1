//! ShadCN-style reusable UI components.
//!
//! A small set of composable components inspired by shadcn/ui, rendered via
//! Leptos SSR.
//!
//! # Components
//!
//! - [`Button`], [`ActionButton`]: clickable buttons with variants
//! - [`TextInput`]: single-line text field
//! - [`Select`]: native dropdown
//! - [`Avatar`]: assistant avatar with mood border
//! - [`ScrollArea`]: scrollable container
//! - [`icons`]: SVG icon components

mod avatar;
mod button;
pub mod icons;
mod input;
mod scroll_area;
mod select;

pub use avatar::Avatar;
pub use button::{ActionButton, Button, ButtonSize, ButtonVariant};
pub use icons::*;
pub use input::TextInput;
pub use scroll_area::ScrollArea;
pub use select::{Select, SelectOption};
