// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery of schedule change outcomes to interested parties.
//!
//! Handlers call the sink only after the workflow transaction has committed.
//! A sink never sees an outcome that was rolled back.

use std::sync::{Mutex, PoisonError};

use d8tl::ScheduleChangeNotification;
use tracing::info;

/// Receives committed approve/deny outcomes.
pub trait NotificationSink: Send + Sync {
    /// Delivers one notification.
    fn notify(&self, notification: &ScheduleChangeNotification);
}

/// Sink that writes each notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: &ScheduleChangeNotification) {
        info!(
            game_id = notification.game_id,
            request_id = notification.request_id,
            request_type = %notification.request_type,
            outcome = %notification.outcome,
            "Schedule change notification"
        );
    }
}

/// Sink that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    delivered: Mutex<Vec<ScheduleChangeNotification>>,
}

impl RecordingNotificationSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notification delivered so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<ScheduleChangeNotification> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: &ScheduleChangeNotification) {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
