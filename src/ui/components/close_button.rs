//! Close button component.
//!
//! The square "x" affordance shown in the corner of a closable webview.

use gpui::{
    div, px, ClickEvent, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled,
};

use crate::ui::theme::ThemeColors;

/// Type alias for button click handlers.
type ClickHandler = Box<dyn Fn(&ClickEvent, &mut gpui::Window, &mut gpui::App) + 'static>;

/// Glyph drawn inside the button.
const CLOSE_GLYPH: &str = "\u{2715}";

/// Side length of the button in pixels.
const SIZE: f32 = 28.0;

/// A close button.
#[derive(IntoElement)]
pub struct CloseButton {
    id: ElementId,
    label: SharedString,
    colors: ThemeColors,
    on_click: Option<ClickHandler>,
}

impl CloseButton {
    /// Create a close button with an accessible label.
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>, colors: ThemeColors) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            colors,
            on_click: None,
        }
    }

    /// Set the click handler.
    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut gpui::Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for CloseButton {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = self.colors;
        let hover_bg = colors.surface_elevated;
        let hover_text = colors.text_primary;

        let mut element = div()
            .id(self.id)
            .absolute()
            .top(px(12.0))
            .right(px(12.0))
            .size(px(SIZE))
            .flex()
            .items_center()
            .justify_center()
            .rounded(px(4.0))
            .bg(colors.surface)
            .text_color(colors.text_secondary)
            .cursor_pointer()
            .hover(move |style| style.bg(hover_bg).text_color(hover_text))
            .child(SharedString::from(CLOSE_GLYPH));

        if let Some(handler) = self.on_click {
            element = element.on_click(handler);
        }

        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_button_builder() {
        let button = CloseButton::new("close", "Cancel", ThemeColors::dark())
            .on_click(|_, _, _| {});

        assert_eq!(button.label.as_ref(), "Cancel");
        assert!(button.on_click.is_some());
    }
}
