// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEvent {
    ExpensesChanged { user_id: i64 },
    SettingsChanged { user_id: i64 },
}

impl DataEvent {
    pub fn user_id(&self) -> i64 {
        match self {
            DataEvent::ExpensesChanged { user_id } | DataEvent::SettingsChanged { user_id } => {
                *user_id
            }
        }
    }
}

type Subscriber = Box<dyn Fn(&DataEvent) + Send + Sync>;

/// Views register a callback here and get one call per store mutation.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl Fn(&DataEvent) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(f));
    }

    /// Delivers `event` to every subscriber in registration order.
    pub fn publish(&self, event: DataEvent) {
        debug!(?event, subscribers = self.subscribers.len(), "publishing");
        for s in &self.subscribers {
            s(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
