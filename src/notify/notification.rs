use std::fmt;

use crate::types::item::Item;

/// A chat message plus the roles it should mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub ping_roles: Vec<String>,
}

impl Notification {
    pub fn new(message: impl Into<String>, ping_roles: Vec<String>) -> Self {
        Self {
            message: message.into(),
            ping_roles,
        }
    }

    pub fn sold(item: &Item) -> Self {
        Self::new(
            format!(
                "⚠️Listing Update⚠️\n{} with serial number {} has been sold.",
                item.name, item.serial
            ),
            Vec::new(),
        )
    }

    pub fn listed(item: &Item, ping_roles: &[String]) -> Self {
        Self::new(
            format!(
                "❗New Listing Alert❗\n{}\n{}\n{}\n",
                item.name,
                item.url,
                item.images_joined()
            ),
            ping_roles.to_vec(),
        )
    }

    pub fn heartbeat(bot_name: &str) -> Self {
        Self::new(format!("{bot_name} is running."), Vec::new())
    }

    /// Webhook body text: every role mention, then a blank line, then the message.
    pub fn content(&self) -> String {
        let mentions: String = self
            .ping_roles
            .iter()
            .map(|role| format!("@{role} "))
            .collect();

        format!("{mentions}\n\n{}", self.message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.message)
    }
}
