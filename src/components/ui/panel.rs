use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Panel, section, "bg-card text-card-foreground flex w-80 flex-col gap-3 p-4"}
    clx! {PanelHeader, header, "flex items-center justify-between gap-2"}
    clx! {PanelTitle, h1, "text-sm leading-none font-semibold"}
    clx! {PanelDescription, p, "text-muted-foreground text-xs"}
    clx! {PanelFooter, footer, "flex items-center justify-end", "gap-2"}
}

pub use components::*;
