//! Scripts injected into the hosted page.
//!
//! Everything here runs inside the website, so each snippet guards against
//! double installation: the webview re-runs initialization scripts on every
//! navigation.

use crate::config::ShellConfig;

/// DOM id of the floating refresh button.
pub const REFRESH_BUTTON_ID: &str = "gptlite-refresh-btn";

pub const SELECT_ALL: &str = "document.execCommand('selectAll');";
pub const DELETE_SELECTION: &str = "document.execCommand('delete');";

const REFRESH_BUTTON: &str = r##"(function () {
  var ID = "gptlite-refresh-btn";
  var BASE = "#10a37f";
  var HOVER = "#0d8c6a";
  function install() {
    if (!document.body || document.getElementById(ID)) return;
    var btn = document.createElement("button");
    btn.id = ID;
    btn.type = "button";
    btn.textContent = "\u21BB";
    btn.title = "Reload (F5)";
    btn.setAttribute("aria-label", "Reload");
    btn.style.cssText = "position: fixed; top: 10px; right: 10px; z-index: 99999; background: " + BASE +
      "; color: white; border: none; border-radius: 50%; width: 40px; height: 40px; font-size: 20px;" +
      " cursor: pointer; box-shadow: 0 2px 8px rgba(0,0,0,0.3); transition: all 0.2s;";
    btn.onmouseover = function () { btn.style.transform = "scale(1.1)"; btn.style.background = HOVER; };
    btn.onmouseout = function () { btn.style.transform = "scale(1)"; btn.style.background = BASE; };
    btn.onclick = function () { location.reload(); };
    document.body.appendChild(btn);
  }
  if (!window.__gptliteReloadKey) {
    window.__gptliteReloadKey = true;
    window.addEventListener("keydown", function (e) {
      if (e.key === "F5") { e.preventDefault(); location.reload(); }
    }, true);
  }
  if (document.readyState === "loading") {
    document.addEventListener("DOMContentLoaded", install, { once: true });
  } else {
    install();
  }
  window.addEventListener("load", install, { once: true });
})();"##;

const CONTEXT_MENU_BRIDGE: &str = r#"(function () {
  if (window.__gptliteContextMenu) return;
  window.__gptliteContextMenu = true;
  function closest(el, tag) {
    while (el && el !== document) {
      if (el.tagName === tag) return el;
      el = el.parentElement;
    }
    return null;
  }
  function editable(el) {
    if (!el) return false;
    if (el.isContentEditable) return true;
    var tag = el.tagName;
    if (tag === "TEXTAREA") return !el.readOnly && !el.disabled;
    if (tag === "INPUT") {
      var t = (el.type || "text").toLowerCase();
      var textual = ["text", "search", "url", "email", "tel", "password", "number"];
      return textual.indexOf(t) !== -1 && !el.readOnly && !el.disabled;
    }
    return false;
  }
  document.addEventListener("contextmenu", function (e) {
    if (!window.ipc || !window.ipc.postMessage) return;
    e.preventDefault();
    var target = e.target;
    var link = closest(target, "A");
    var media = "none";
    var src = "";
    if (target && target.tagName === "IMG") { media = "image"; src = target.currentSrc || target.src || ""; }
    else if (target && target.tagName === "VIDEO") { media = "video"; src = target.currentSrc || ""; }
    else if (target && target.tagName === "AUDIO") { media = "audio"; src = target.currentSrc || ""; }
    var selection = window.getSelection ? String(window.getSelection()) : "";
    window.ipc.postMessage(JSON.stringify({
      kind: "context_menu",
      params: {
        selectionText: selection,
        isEditable: editable(target),
        linkUrl: link && link.href ? String(link.href) : "",
        mediaType: media,
        srcUrl: src,
        x: e.clientX,
        y: e.clientY
      }
    }));
  }, true);
})();"#;

/// Floating refresh button plus the F5 reload binding.
pub fn refresh_button_script() -> &'static str {
    REFRESH_BUTTON
}

/// Forwards right-clicks to the host as `context_menu` IPC messages.
pub fn context_menu_bridge_script() -> &'static str {
    CONTEXT_MENU_BRIDGE
}

/// Inserts `text` at the caret of the focused editable element.
pub fn insert_text_script(text: &str) -> String {
    // serde_json yields a valid, fully escaped JS string literal.
    let literal = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!("document.execCommand('insertText', false, {literal});")
}

/// Everything injected at document start for the given configuration.
pub fn initialization_script(cfg: &ShellConfig) -> String {
    let mut parts = vec![context_menu_bridge_script()];
    if cfg.refresh_button {
        parts.push(refresh_button_script());
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_button_is_idempotent_and_uses_id() {
        let script = refresh_button_script();
        assert!(script.contains(REFRESH_BUTTON_ID));
        assert!(script.contains("document.getElementById(ID)"));
        assert!(script.contains("location.reload()"));
        assert!(script.contains("F5"));
    }

    #[test]
    fn bridge_posts_context_menu_kind() {
        let script = context_menu_bridge_script();
        assert!(script.contains("\"context_menu\""));
        assert!(script.contains("selectionText"));
        assert!(script.contains("isEditable"));
        assert!(script.contains("linkUrl"));
        assert!(script.contains("mediaType"));
    }

    #[test]
    fn insert_text_escapes_quotes_and_newlines() {
        let script = insert_text_script("it's \"quoted\"\nnext</script>");
        assert_eq!(
            script,
            "document.execCommand('insertText', false, \"it's \\\"quoted\\\"\\nnext</script>\");"
        );
    }

    #[test]
    fn initialization_script_respects_refresh_toggle() {
        let mut cfg = ShellConfig::default();
        assert!(initialization_script(&cfg).contains(REFRESH_BUTTON_ID));

        cfg.refresh_button = false;
        let script = initialization_script(&cfg);
        assert!(!script.contains(REFRESH_BUTTON_ID));
        assert!(script.contains("contextmenu"));
    }
}
