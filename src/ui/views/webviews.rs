//! Webview list view
//!
//! Stacks one webview per account and shows only the visible one. Account
//! list updates and webview messages arrive on channels drained by two
//! background tasks. Each webview message is then dispatched on a task of
//! its own.

use futures::channel::mpsc;
use futures::StreamExt;
use gpui::{
    div, prelude::FluentBuilder, ClickEvent, Context, FocusHandle, Focusable, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, Styled, Task, Window,
};

use crate::app::events::InboundMessage;
use crate::app::CloseWebview;
use crate::config::Locale;
use crate::domain::{Account, AccountId};
use crate::services::{WebviewDeck, WebviewItem};
use crate::ui::components::{CloseButton, Notice};
use crate::ui::locale::{get_text, third_party_notice, Text};
use crate::ui::theme::Theme;

/// The stacked webviews of all accounts.
pub struct WebviewsView {
    deck: WebviewDeck,
    theme: Theme,
    locale: Locale,
    focus_handle: FocusHandle,
    _accounts_task: Task<()>,
    _inbox_task: Task<()>,
}

impl WebviewsView {
    /// Creates the view.
    ///
    /// `accounts` delivers the owner's list after every change; `inbox`
    /// delivers messages sent by the webviews.
    pub fn new(
        deck: WebviewDeck,
        accounts: mpsc::UnboundedReceiver<Vec<Account>>,
        inbox: mpsc::UnboundedReceiver<InboundMessage>,
        theme: Theme,
        locale: Locale,
        cx: &mut Context<Self>,
    ) -> Self {
        let accounts_task = cx.spawn(async move |this, cx: &mut gpui::AsyncApp| {
            let mut accounts = accounts;
            while let Some(next) = accounts.next().await {
                if let Err(e) = this.update(cx, |view, cx| {
                    if view.deck.set_accounts(next) {
                        tracing::debug!(event = "ui.webviews.redraw");
                        cx.notify();
                    }
                }) {
                    tracing::debug!(
                        event = "ui.webviews.accounts_task.stopped",
                        reason = "view_dropped",
                        error = ?e
                    );
                    return;
                }
            }
        });

        let inbox_task = cx.spawn(async move |this, cx: &mut gpui::AsyncApp| {
            let mut inbox = inbox;
            while let Some(inbound) = inbox.next().await {
                if this
                    .update(cx, |view, cx| view.handle_inbound(inbound, cx))
                    .is_err()
                {
                    tracing::debug!(event = "ui.webviews.inbox_task.stopped", reason = "view_dropped");
                    return;
                }
            }
        });

        Self {
            deck,
            theme,
            locale,
            focus_handle: cx.focus_handle(),
            _accounts_task: accounts_task,
            _inbox_task: inbox_task,
        }
    }

    pub fn deck(&self) -> &WebviewDeck {
        &self.deck
    }

    /// Dispatches one webview message on its own task, so a message
    /// waiting on the host does not hold back the ones after it.
    fn handle_inbound(&mut self, inbound: InboundMessage, cx: &mut Context<Self>) {
        let pending = match self.deck.prepare(&inbound.account_id, &inbound.message) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!(
                    event = "ui.webviews.ipc_unknown_account",
                    account_id = %inbound.account_id,
                    channel = %inbound.message.channel,
                    error = %e
                );
                return;
            }
        };

        cx.spawn(async move |this, cx: &mut gpui::AsyncApp| {
            let account_id = pending.account_id().clone();
            let channel = pending.channel().to_string();
            match pending.run().await {
                Ok(recognized) => {
                    let _ = this.update(cx, |view, cx| {
                        if view.deck.complete(&account_id, recognized) {
                            cx.notify();
                        }
                    });
                }
                Err(e) => tracing::warn!(
                    event = "ui.webviews.ipc_failed",
                    account_id = %account_id,
                    channel = %channel,
                    error = %e
                ),
            }
        })
        .detach();
    }

    fn close_webview(&mut self, id: AccountId, cx: &mut Context<Self>) {
        let Some(account) = self.deck.account(&id).cloned() else {
            tracing::warn!(event = "ui.webviews.close_unknown_account", account_id = %id);
            return;
        };
        tracing::info!(event = "ui.webviews.close_clicked", account_id = %id);

        let dispatcher = self.deck.dispatcher();
        cx.spawn(async move |_this, _cx: &mut gpui::AsyncApp| {
            if let Err(e) = dispatcher.delete_webview(&account).await {
                tracing::warn!(
                    event = "ui.webviews.close_failed",
                    account_id = %account.id,
                    error = %e
                );
            }
        })
        .detach();
    }

    fn on_close_visible(&mut self, _: &CloseWebview, _window: &mut Window, cx: &mut Context<Self>) {
        let target = self
            .deck
            .items()
            .into_iter()
            .find(|item| item.visible && item.closable)
            .map(|item| item.account_id);

        match target {
            Some(id) => self.close_webview(id, cx),
            None => tracing::debug!(event = "ui.webviews.close_ignored", reason = "not_closable"),
        }
    }

    fn render_item(&self, item: WebviewItem, cx: &Context<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;
        let account_id = item.account_id.clone();

        div()
            .id(SharedString::from(format!("webview-{}", item.account_id)))
            .absolute()
            .inset_0()
            .when(!item.visible, |this| this.invisible())
            .child(
                // Engine surface.
                div()
                    .size_full()
                    .flex()
                    .items_center()
                    .justify_center()
                    .bg(colors.surface)
                    .text_color(colors.text_secondary)
                    .child(SharedString::from(item.props.src.clone())),
            )
            .when_some(item.third_party_notice.as_ref(), |this, title| {
                this.child(Notice::new(
                    SharedString::from(format!("notice-{}", item.account_id)),
                    third_party_notice(self.locale, title),
                    colors.clone(),
                ))
            })
            .when(item.closable, |this| {
                this.child(
                    CloseButton::new(
                        SharedString::from(format!("close-{}", item.account_id)),
                        get_text(self.locale, Text::CloseWebview),
                        colors.clone(),
                    )
                    .on_click(cx.listener(
                        move |view, _: &ClickEvent, _window, cx| {
                            view.close_webview(account_id.clone(), cx)
                        },
                    )),
                )
            })
    }
}

impl Focusable for WebviewsView {
    fn focus_handle(&self, _cx: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for WebviewsView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let items = self.deck.items();

        div()
            .id("webviews")
            .key_context("Webviews")
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::on_close_visible))
            .relative()
            .size_full()
            .bg(self.theme.colors.background)
            .children(items.into_iter().map(|item| self.render_item(item, cx)))
    }
}
