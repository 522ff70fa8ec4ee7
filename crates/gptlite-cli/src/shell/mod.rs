//! Native shell: one tao window per registry entry, each hosting a wry webview.
//!
//! All webview callbacks run on the event-loop thread. They either answer
//! synchronously (navigation routing) or post a [`UserEvent`] back to the
//! loop, which owns every window through the [`WindowRegistry`].

mod menu;

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use gptlite_core::config::ShellConfig;
use gptlite_core::context_menu::{build_menu, ContextMenuParams, MenuAction};
use gptlite_core::ipc::{parse_message, PageMessage};
use gptlite_core::opener::SystemOpener;
use gptlite_core::page_script;
use gptlite_core::policy::{NavigationDecision, NavigationGate, PreApproved};
use gptlite_core::windows::{QuitPolicy, WindowKey, WindowRegistry};
use tao::event::{Event, StartCause, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Icon, Window, WindowBuilder, WindowId};
use wry::{NewWindowResponse, PageLoadEvent, WebView, WebViewBuilder};

#[cfg(target_os = "linux")]
use wry::WebViewBuilderExtUnix;

/// Hidden windows are shown after this long even if the page never finishes loading.
const SHOW_FALLBACK: Duration = Duration::from_secs(3);

#[derive(Debug)]
enum UserEvent {
    PageLoaded(WindowId),
    /// A contained `window.open`/`target=_blank` request, loaded in the opener window.
    LoadInPlace(WindowId, String),
    ContextMenu(WindowId, ContextMenuParams),
    Menu(muda::MenuEvent),
}

struct ShellWindow {
    window: Window,
    webview: WebView,
    show_by: Option<Instant>,
}

/// Menu currently on screen and the window it belongs to.
struct OpenMenu {
    key: WindowKey,
    actions: HashMap<muda::MenuId, MenuAction>,
    // Keeps the native menu alive until an item fires or the next menu replaces it.
    _menu: muda::Menu,
}

pub fn run(cfg: ShellConfig) -> Result<()> {
    let trusted = Arc::new(cfg.trusted_set()?);
    let gate = NavigationGate::new(trusted, Arc::new(SystemOpener));
    let quit_policy = QuitPolicy::for_current_platform();

    #[allow(unused_mut)]
    let mut builder = EventLoopBuilder::<UserEvent>::with_user_event();
    #[cfg(target_os = "linux")]
    {
        use tao::platform::unix::EventLoopBuilderExtUnix;
        builder.with_app_id(cfg.app_id.clone());
    }
    let event_loop = builder.build();
    let proxy = event_loop.create_proxy();

    let menu_proxy = proxy.clone();
    muda::MenuEvent::set_event_handler(Some(move |event: muda::MenuEvent| {
        let _ = menu_proxy.send_event(UserEvent::Menu(event));
    }));

    let mut registry: WindowRegistry<ShellWindow> = WindowRegistry::new();
    let main = create_window(&event_loop, &cfg, &gate, &proxy)?;
    registry.insert(main);
    tracing::info!("shell started at {}", cfg.start_url);

    let mut open_menu: Option<OpenMenu> = None;

    event_loop.run(move |event, target, control_flow| {
        *control_flow = match next_show_deadline(&registry) {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };

        match event {
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                let now = Instant::now();
                for key in registry.keys().collect::<Vec<_>>() {
                    if let Some(w) = registry.get_mut(key) {
                        if w.show_by.is_some_and(|t| t <= now) {
                            tracing::debug!("{key} not loaded in time, showing anyway");
                            show(w);
                        }
                    }
                }
            }
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if let Some(key) = registry.find(|w| w.window.id() == window_id) {
                    registry.remove(key);
                    if open_menu.as_ref().is_some_and(|m| m.key == key) {
                        open_menu = None;
                    }
                }
                if quit_policy.should_quit(&registry) {
                    tracing::info!("last window closed, exiting");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::Reopen { .. } => {
                if quit_policy.should_recreate_on_activate(&registry) {
                    match create_window(target, &cfg, &gate, &proxy) {
                        Ok(w) => {
                            registry.insert(w);
                        }
                        Err(e) => tracing::error!("recreate window: {e:#}"),
                    }
                }
            }
            Event::UserEvent(UserEvent::PageLoaded(window_id)) => {
                if let Some(key) = registry.find(|w| w.window.id() == window_id) {
                    if let Some(w) = registry.get_mut(key) {
                        show(w);
                    }
                }
            }
            Event::UserEvent(UserEvent::LoadInPlace(window_id, url)) => {
                if let Some(w) = lookup(&registry, window_id) {
                    if let Err(e) = w.webview.load_url(&url) {
                        tracing::warn!("load {url} in place: {e}");
                    }
                }
            }
            Event::UserEvent(UserEvent::ContextMenu(window_id, params)) => {
                if let Some(key) = registry.find(|w| w.window.id() == window_id) {
                    if let Some(w) = registry.get(key) {
                        let entries = build_menu(&params);
                        match menu::popup(&w.window, &entries, params.x, params.y) {
                            Ok((native, actions)) => {
                                open_menu = Some(OpenMenu {
                                    key,
                                    actions,
                                    _menu: native,
                                });
                            }
                            Err(e) => tracing::warn!("context menu: {e:#}"),
                        }
                    }
                }
            }
            Event::UserEvent(UserEvent::Menu(event)) => {
                if let Some(open) = open_menu.take() {
                    match (open.actions.get(&event.id), registry.get(open.key)) {
                        (Some(action), Some(w)) => menu::perform(&w.webview, action),
                        _ => tracing::debug!("menu event {:?} has no live target", event.id),
                    }
                }
            }
            _ => {}
        }
    })
}

fn lookup(registry: &WindowRegistry<ShellWindow>, id: WindowId) -> Option<&ShellWindow> {
    registry
        .find(|w| w.window.id() == id)
        .and_then(|key| registry.get(key))
}

fn show(w: &mut ShellWindow) {
    if w.show_by.take().is_some() {
        w.window.set_visible(true);
        w.window.set_focus();
    }
}

fn next_show_deadline(registry: &WindowRegistry<ShellWindow>) -> Option<Instant> {
    registry
        .keys()
        .filter_map(|key| registry.get(key).and_then(|w| w.show_by))
        .min()
}

fn load_icon(path: &std::path::Path) -> Result<Icon> {
    let image = image::open(path)
        .with_context(|| format!("read icon: {}", path.display()))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).context("build window icon")
}

fn create_window(
    target: &EventLoopWindowTarget<UserEvent>,
    cfg: &ShellConfig,
    gate: &NavigationGate,
    proxy: &EventLoopProxy<UserEvent>,
) -> Result<ShellWindow> {
    let wcfg = &cfg.window;
    let icon = wcfg.icon.as_deref().and_then(|path| {
        load_icon(path)
            .map_err(|e| tracing::warn!("{e:#}"))
            .ok()
    });

    // Hidden until the first page load finishes, so no blank frame flashes up.
    let window = WindowBuilder::new()
        .with_title(&wcfg.title)
        .with_inner_size(tao::dpi::LogicalSize::new(wcfg.width, wcfg.height))
        .with_min_inner_size(tao::dpi::LogicalSize::new(wcfg.min_width, wcfg.min_height))
        .with_window_icon(icon)
        .with_visible(false)
        .build(target)
        .context("create window")?;
    let window_id = window.id();

    let nav_gate = gate.clone();
    let approved = PreApproved::new();
    let new_window_approved = approved.clone();
    let new_window_gate = gate.clone();
    let new_window_proxy = proxy.clone();
    let load_proxy = proxy.clone();
    let ipc_proxy = proxy.clone();

    let builder = WebViewBuilder::new()
        .with_url(cfg.start_url.as_str())
        .with_user_agent(cfg.user_agent.as_str())
        .with_devtools(wcfg.devtools)
        .with_initialization_script(page_script::initialization_script(cfg).as_str())
        .with_navigation_handler(move |url: String| {
            approved.consume(&url) || nav_gate.intercept_navigation(&url, None)
        })
        .with_new_window_req_handler(move |url: String, _features| {
            // Contained popups load in this window instead of spawning a new one.
            if new_window_gate.route(&url, None) == NavigationDecision::Contain {
                new_window_approved.grant(url.clone());
                let _ = new_window_proxy.send_event(UserEvent::LoadInPlace(window_id, url));
            }
            NewWindowResponse::Deny
        })
        .with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Finished = event {
                tracing::debug!("page loaded: {url}");
                let _ = load_proxy.send_event(UserEvent::PageLoaded(window_id));
            }
        })
        .with_ipc_handler(move |request: wry::http::Request<String>| {
            match parse_message(request.body()) {
                Ok(PageMessage::ContextMenu { params }) => {
                    let _ = ipc_proxy.send_event(UserEvent::ContextMenu(window_id, params));
                }
                Err(e) => tracing::warn!("ignoring page message: {e}"),
            }
        });

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        builder.build_gtk(window.gtk_window()).context("create webview")?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).context("create webview")?;

    Ok(ShellWindow {
        window,
        webview,
        show_by: Some(Instant::now() + SHOW_FALLBACK),
    })
}
