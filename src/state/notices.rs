//! User-visible outcome notifications.
//!
//! Every moderation action outcome reaches a notice — failures are never
//! swallowed silently. Notices carry a uuid identity so dismissal (manual or
//! timed) stays correct while the list changes underneath.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A single notification shown in the tray.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: String,
    pub kind: NoticeKind,
    pub text: String,
}

/// State for the notification tray.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticesState {
    pub items: Vec<Notice>,
}

impl NoticesState {
    pub fn push_success(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into());
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    fn push(&mut self, kind: NoticeKind, text: String) {
        self.items.push(Notice {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            text,
        });
    }

    /// Remove a notice by id; removing an already-dismissed id is a no-op.
    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|notice| notice.id != id);
    }
}
