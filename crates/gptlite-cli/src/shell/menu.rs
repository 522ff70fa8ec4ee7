//! Native rendering of the context menu and execution of its actions.

use anyhow::{Context, Result};
use std::collections::HashMap;

use gptlite_core::context_menu::{MenuAction, MenuEffect, MenuEntry};
use gptlite_core::page_script;
use muda::dpi::{LogicalPosition, Position};
use muda::{ContextMenu, Menu, MenuId, MenuItem, PredefinedMenuItem};
use tao::window::Window;
use wry::WebView;

/// Shows `entries` at the cursor position (CSS pixels from the page).
pub(super) fn popup(
    window: &Window,
    entries: &[MenuEntry],
    x: f64,
    y: f64,
) -> Result<(Menu, HashMap<MenuId, MenuAction>)> {
    let menu = Menu::new();
    let mut actions = HashMap::new();

    for entry in entries {
        match entry {
            MenuEntry::Separator => menu
                .append(&PredefinedMenuItem::separator())
                .context("append separator")?,
            MenuEntry::Item(action) => {
                let item = MenuItem::new(action.label(), true, None);
                menu.append(&item)
                    .with_context(|| format!("append {:?}", action.label()))?;
                actions.insert(item.id().clone(), action.clone());
            }
        }
    }

    let position = Some(Position::Logical(LogicalPosition::new(x, y)));
    let shown = show_for_window(&menu, window, position);
    if !shown {
        tracing::debug!("context menu dismissed without a selection");
    }
    Ok((menu, actions))
}

#[cfg(target_os = "linux")]
fn show_for_window(menu: &Menu, window: &Window, position: Option<Position>) -> bool {
    use tao::platform::unix::WindowExtUnix;
    menu.show_context_menu_for_gtk_window(window.gtk_window(), position)
}

#[cfg(target_os = "windows")]
fn show_for_window(menu: &Menu, window: &Window, position: Option<Position>) -> bool {
    use tao::platform::windows::WindowExtWindows;
    // SAFETY: the HWND belongs to a live tao window owned by the registry.
    unsafe { menu.show_context_menu_for_hwnd(window.hwnd() as _, position) }
}

#[cfg(target_os = "macos")]
fn show_for_window(menu: &Menu, window: &Window, position: Option<Position>) -> bool {
    use tao::platform::macos::WindowExtMacOS;
    // SAFETY: the NSView belongs to a live tao window owned by the registry.
    unsafe { menu.show_context_menu_for_nsview(window.ns_view() as _, position) }
}

/// Runs every effect of `action` against `webview`; failures are logged only.
pub(super) fn perform(webview: &WebView, action: &MenuAction) {
    let page_url = webview.url().ok();
    for effect in action.effects(page_url.as_deref()) {
        if let Err(e) = apply(webview, effect) {
            tracing::warn!("{}: {e:#}", action.label());
        }
    }
}

fn apply(webview: &WebView, effect: MenuEffect) -> Result<()> {
    match effect {
        MenuEffect::WriteClipboard(text) => {
            arboard::Clipboard::new()
                .context("open clipboard")?
                .set_text(text)
                .context("write clipboard")?;
        }
        MenuEffect::Eval(script) => webview.evaluate_script(&script).context("evaluate script")?,
        MenuEffect::PasteClipboard => {
            let text = arboard::Clipboard::new()
                .context("open clipboard")?
                .get_text()
                .context("read clipboard")?;
            webview
                .evaluate_script(&page_script::insert_text_script(&text))
                .context("insert text")?;
        }
    }
    Ok(())
}
