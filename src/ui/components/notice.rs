//! Backend notice banner.
//!
//! Shown across the top of a webview while an account signs in to a
//! third-party backend.

use gpui::{
    div, px, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    Styled,
};

use crate::ui::theme::ThemeColors;

/// A full-width banner with a single line of text.
#[derive(IntoElement)]
pub struct Notice {
    id: ElementId,
    text: SharedString,
    colors: ThemeColors,
}

impl Notice {
    pub fn new(id: impl Into<ElementId>, text: impl Into<SharedString>, colors: ThemeColors) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            colors,
        }
    }
}

impl RenderOnce for Notice {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        div()
            .id(self.id)
            .absolute()
            .top_0()
            .left_0()
            .w_full()
            .h(px(32.0))
            .px(px(12.0))
            .flex()
            .items_center()
            .justify_center()
            .bg(self.colors.notice)
            .text_color(self.colors.notice_text)
            .text_size(px(12.0))
            .font_weight(gpui::FontWeight::MEDIUM)
            .child(self.text)
    }
}
