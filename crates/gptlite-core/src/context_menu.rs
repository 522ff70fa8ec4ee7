//! Right-click menu contents.
//!
//! The page reports what was under the cursor ([`ContextMenuParams`]); the menu
//! is rebuilt from those facts on every click. Executing an entry is split into
//! [`MenuEffect`]s so the shell only has to know about clipboard and script
//! evaluation.

use serde::{Deserialize, Serialize};

use crate::page_script;

/// Kind of media element under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    None,
    Image,
    Video,
    Audio,
    #[serde(other)]
    Other,
}

/// What the page saw at the right-click position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextMenuParams {
    pub selection_text: String,
    pub is_editable: bool,
    /// Absolute href of the enclosing link, empty when none.
    pub link_url: String,
    pub media_type: MediaType,
    /// Source of the image/video under the cursor, empty when none.
    pub src_url: String,
    /// Cursor position in CSS pixels, relative to the viewport.
    pub x: f64,
    pub y: f64,
}

impl ContextMenuParams {
    fn has_selection(&self) -> bool {
        !self.selection_text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Copy(String),
    Cut(String),
    Paste,
    SelectAll,
    CopyPageUrl,
    CopyLink(String),
    CopyImageAddress(String),
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Copy(_) => "Copy",
            MenuAction::Cut(_) => "Cut",
            MenuAction::Paste => "Paste",
            MenuAction::SelectAll => "Select All",
            MenuAction::CopyPageUrl => "Copy Page URL",
            MenuAction::CopyLink(_) => "Copy Link",
            MenuAction::CopyImageAddress(_) => "Copy Image Address",
        }
    }

    /// Steps needed to carry out the action. `page_url` is the webview's current address.
    pub fn effects(&self, page_url: Option<&str>) -> Vec<MenuEffect> {
        match self {
            MenuAction::Copy(text) => vec![MenuEffect::WriteClipboard(text.clone())],
            MenuAction::Cut(text) => vec![
                MenuEffect::WriteClipboard(text.clone()),
                MenuEffect::Eval(page_script::DELETE_SELECTION.to_string()),
            ],
            MenuAction::Paste => vec![MenuEffect::PasteClipboard],
            MenuAction::SelectAll => vec![MenuEffect::Eval(page_script::SELECT_ALL.to_string())],
            MenuAction::CopyPageUrl => match page_url {
                Some(url) if !url.is_empty() => vec![MenuEffect::WriteClipboard(url.to_string())],
                _ => Vec::new(),
            },
            MenuAction::CopyLink(url) | MenuAction::CopyImageAddress(url) => {
                vec![MenuEffect::WriteClipboard(url.clone())]
            }
        }
    }
}

/// A primitive the shell performs for a menu action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEffect {
    WriteClipboard(String),
    /// Evaluate a script in the page.
    Eval(String),
    /// Read clipboard text and insert it at the page's caret.
    PasteClipboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuAction),
    Separator,
}

/// Builds the menu for one right-click.
pub fn build_menu(params: &ContextMenuParams) -> Vec<MenuEntry> {
    let mut entries = Vec::new();

    if params.has_selection() {
        entries.push(MenuEntry::Item(MenuAction::Copy(params.selection_text.clone())));
    }

    if params.is_editable {
        if params.has_selection() {
            entries.push(MenuEntry::Item(MenuAction::Cut(params.selection_text.clone())));
        }
        entries.push(MenuEntry::Item(MenuAction::Paste));
    }

    if !entries.is_empty() {
        entries.push(MenuEntry::Separator);
    }
    entries.push(MenuEntry::Item(MenuAction::SelectAll));

    entries.push(MenuEntry::Separator);
    entries.push(MenuEntry::Item(MenuAction::CopyPageUrl));

    if !params.link_url.is_empty() {
        entries.push(MenuEntry::Item(MenuAction::CopyLink(params.link_url.clone())));
    }

    if params.media_type == MediaType::Image && !params.src_url.is_empty() {
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::Item(MenuAction::CopyImageAddress(
            params.src_url.clone(),
        )));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(entries: &[MenuEntry]) -> Vec<&'static str> {
        entries
            .iter()
            .map(|e| match e {
                MenuEntry::Item(a) => a.label(),
                MenuEntry::Separator => "---",
            })
            .collect()
    }

    #[test]
    fn plain_page_click() {
        let menu = build_menu(&ContextMenuParams::default());
        assert_eq!(labels(&menu), vec!["Select All", "---", "Copy Page URL"]);
    }

    #[test]
    fn selected_text_outside_input() {
        let params = ContextMenuParams {
            selection_text: "hello".into(),
            ..Default::default()
        };
        assert_eq!(
            labels(&build_menu(&params)),
            vec!["Copy", "---", "Select All", "---", "Copy Page URL"]
        );
    }

    #[test]
    fn editable_without_selection_offers_paste_only() {
        let params = ContextMenuParams {
            is_editable: true,
            ..Default::default()
        };
        assert_eq!(
            labels(&build_menu(&params)),
            vec!["Paste", "---", "Select All", "---", "Copy Page URL"]
        );
    }

    #[test]
    fn editable_with_selection_offers_cut() {
        let params = ContextMenuParams {
            is_editable: true,
            selection_text: "draft".into(),
            ..Default::default()
        };
        assert_eq!(
            labels(&build_menu(&params)),
            vec!["Copy", "Cut", "Paste", "---", "Select All", "---", "Copy Page URL"]
        );
    }

    #[test]
    fn link_and_image_entries() {
        let params = ContextMenuParams {
            link_url: "https://example.com/".into(),
            media_type: MediaType::Image,
            src_url: "https://cdn.example.com/a.png".into(),
            ..Default::default()
        };
        let menu = build_menu(&params);
        assert_eq!(
            labels(&menu),
            vec![
                "Select All",
                "---",
                "Copy Page URL",
                "Copy Link",
                "---",
                "Copy Image Address"
            ]
        );
        assert_eq!(
            menu.last(),
            Some(&MenuEntry::Item(MenuAction::CopyImageAddress(
                "https://cdn.example.com/a.png".into()
            )))
        );
    }

    #[test]
    fn video_gets_no_image_entry() {
        let params = ContextMenuParams {
            media_type: MediaType::Video,
            src_url: "https://cdn.example.com/a.mp4".into(),
            ..Default::default()
        };
        assert!(!labels(&build_menu(&params)).contains(&"Copy Image Address"));
    }

    #[test]
    fn effects_for_clipboard_actions() {
        assert_eq!(
            MenuAction::Copy("x".into()).effects(None),
            vec![MenuEffect::WriteClipboard("x".into())]
        );
        assert_eq!(
            MenuAction::CopyPageUrl.effects(Some("https://chatgpt.com/c/1")),
            vec![MenuEffect::WriteClipboard("https://chatgpt.com/c/1".into())]
        );
        assert!(MenuAction::CopyPageUrl.effects(None).is_empty());
        assert_eq!(MenuAction::Paste.effects(None), vec![MenuEffect::PasteClipboard]);
    }

    #[test]
    fn cut_writes_clipboard_then_deletes() {
        let effects = MenuAction::Cut("abc".into()).effects(None);
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], MenuEffect::WriteClipboard("abc".into()));
        assert!(matches!(&effects[1], MenuEffect::Eval(s) if s.contains("delete")));
    }

    #[test]
    fn params_deserialize_from_page_json() {
        let json = r#"{"selectionText":"hi","isEditable":true,"linkUrl":"","mediaType":"image","srcUrl":"https://x/y.png","x":12.5,"y":40}"#;
        let params: ContextMenuParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.selection_text, "hi");
        assert!(params.is_editable);
        assert_eq!(params.media_type, MediaType::Image);
        assert_eq!(params.x, 12.5);
    }

    #[test]
    fn unknown_media_type_maps_to_other() {
        let params: ContextMenuParams = serde_json::from_str(r#"{"mediaType":"canvas"}"#).unwrap();
        assert_eq!(params.media_type, MediaType::Other);
    }
}
