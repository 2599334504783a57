//! Snackbar notifications.
//!
//! `NotificationCenter` is provided once at the app root; any component can
//! push a message with `use_notifications().notify(..)`. Messages hide
//! themselves after [`AUTO_HIDE_MS`].

use contracts::shared::notification::{Notification, Severity};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub const AUTO_HIDE_MS: u32 = 4000;

/// Максимум одновременно видимых сообщений; старые вытесняются первыми
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Snack {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Debug, Clone, Default)]
pub struct SnackQueue {
    next_id: u64,
    items: Vec<Snack>,
}

impl SnackQueue {
    pub fn push(&mut self, notification: Notification) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Snack { id, notification });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|snack| snack.id != id);
    }

    pub fn items(&self) -> &[Snack] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct NotificationCenter {
    queue: RwSignal<SnackQueue>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(SnackQueue::default()),
        }
    }

    /// Fire-and-forget
    pub fn notify(&self, notification: Notification) {
        if notification.message.trim().is_empty() {
            return;
        }
        let mut id = 0;
        self.queue.update(|q| id = q.push(notification));

        let queue = self.queue;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_HIDE_MS).await;
            queue.update(|q| q.dismiss(id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notification::error(message));
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationCenter {
    use_context::<NotificationCenter>().expect("NotificationCenter not provided in context")
}

/// Отображает текущие уведомления
#[component]
pub fn NotificationHost() -> impl IntoView {
    let center = use_notifications();

    view! {
        <div class="snackbar-stack">
            <For
                each=move || center.queue.get().items().to_vec()
                key=|snack| snack.id
                children=move |snack: Snack| {
                    let intent = match snack.notification.severity {
                        Severity::Success => MessageBarIntent::Success,
                        Severity::Error => MessageBarIntent::Error,
                    };
                    let id = snack.id;
                    view! {
                        <div class="snackbar" on:click=move |_| center.dismiss(id)>
                            <MessageBar intent=intent>
                                <div class="snackbar__text">{snack.notification.message.clone()}</div>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
