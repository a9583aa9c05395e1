//! Collapsible sidebar component.

use leptos::prelude::*;

use super::copy::{ABOUT, TIPS};
use crate::chat::{AvatarMetadata, Model};
use crate::ui::components::{
    ActionButton, Avatar, ButtonSize, ButtonVariant, ScrollArea, Select, SelectOption, TrashIcon,
    XIcon,
};
use crate::ui::palette::Palette;
use crate::ui::urls::SessionUrls;

/// Sidebar with the avatar, about text, model selector, tips and the clear
/// control. Closed, it collapses to zero width but stays in the document.
#[component]
pub fn Sidebar(
    urls: SessionUrls,
    open: bool,
    model: Model,
    avatar: AvatarMetadata,
    avatar_changed: bool,
    palette: Palette,
) -> impl IntoView {
    let width = if open { "w-64 sm:w-72 md:w-80" } else { "w-0" };
    let classes = format!(
        "{width} shrink-0 transition-all duration-300 ease-in-out overflow-hidden \
         flex flex-col h-full border-r {}",
        palette.panel
    );
    let options: Vec<SelectOption> = Model::ALL
        .into_iter()
        .map(|m| SelectOption {
            value: m.as_str(),
            label: m.label(),
        })
        .collect();

    view! {
        <aside id="chat-sidebar" class=classes aria-hidden=(!open).then_some("true")>
            <div class="flex justify-between items-center p-4 border-b">
                <h2 class="font-bold text-lg">"DR HIRO"</h2>
                <ActionButton action=urls.toggle_sidebar() label="Close sidebar">
                    <XIcon/>
                </ActionButton>
            </div>
            <div class="flex-grow overflow-hidden">
                <div class="p-4">
                    <Avatar avatar=avatar animate=avatar_changed/>
                </div>
                <ScrollArea class="h-[calc(100vh-13rem)] px-4">
                    <section class="mb-6">
                        <h2 class="text-xl font-semibold mb-2">"About DR HIRO"</h2>
                        <p class="text-sm">{ABOUT}</p>
                    </section>
                    <div class="mb-6">
                        <label for="model-select" class="block text-sm font-medium mb-2">
                            "Choose a model"
                        </label>
                        <Select
                            id="model-select"
                            name="model"
                            options=options
                            selected=model.as_str()
                            hx_post=urls.model()
                            class=palette.field
                        />
                    </div>
                    <details class=format!("p-4 rounded-lg mb-6 {}", palette.card) open=true>
                        <summary class="font-bold mb-3 text-lg cursor-pointer">
                            "Tips for using Dr. Hiro"
                        </summary>
                        <ul class="text-sm space-y-2 list-disc list-inside">
                            {TIPS.into_iter().map(|tip| view! { <li>{tip}</li> }).collect_view()}
                        </ul>
                    </details>
                    <ActionButton
                        action=urls.clear()
                        variant=ButtonVariant::Destructive
                        size=ButtonSize::Sm
                        class="w-full mb-6"
                    >
                        <TrashIcon class="h-4 w-4 mr-2"/>
                        "Clear Chat"
                    </ActionButton>
                </ScrollArea>
            </div>
        </aside>
    }
}
