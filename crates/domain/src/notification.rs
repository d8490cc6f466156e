use serde::{Deserialize, Serialize};

/// Visual status of a flash notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// Operation completed.
    Success,
}

/// Flash notification shown after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    status: NotificationStatus,
    title: String,
    body: Option<String>,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(title: impl Into<String>, body: Option<&str>) -> Self {
        Self {
            status: NotificationStatus::Success,
            title: title.into(),
            body: body.map(str::to_owned),
        }
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> NotificationStatus {
        self.status
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
