use crate::{
    chat::port::ChatClient,
    domain::{ChatId, UserId},
};

/// Outcome of the admin gate.
///
/// Denial and infrastructure failure are kept distinct so they show up
/// differently in logs, but both fail closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminCheck {
    Authorized,
    Denied,
    LookupFailed,
}

impl AdminCheck {
    pub fn is_authorized(self) -> bool {
        matches!(self, AdminCheck::Authorized)
    }
}

/// Check whether `user` currently holds administrator or owner status in
/// `chat`. Any lookup failure is treated as not authorized.
pub async fn check_admin(client: &dyn ChatClient, chat: ChatId, user: UserId) -> AdminCheck {
    match client.member_role(chat, user).await {
        Ok(role) if role.is_privileged() => AdminCheck::Authorized,
        Ok(_) => AdminCheck::Denied,
        Err(e) => {
            tracing::warn!(
                chat = chat.0,
                user = user.0,
                error = %e,
                "admin lookup failed, treating as unauthorized"
            );
            AdminCheck::LookupFailed
        }
    }
}
