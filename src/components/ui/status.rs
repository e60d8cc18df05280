use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {StatusLine, p, "text-muted-foreground min-h-4 text-xs"}
    clx! {ErrorBanner, div, "border-destructive/30 text-destructive w-full rounded-md border px-3 py-2 text-xs"}
}

pub use components::*;
