use crate::{
    auth::check_admin,
    chat::types::{CommandInvocation, UserSnapshot},
    domain::{ChatId, UserId},
    formatting::mention,
    router::Router,
    Result,
};

pub(crate) const NOT_ADMIN: &str = "\u{274c} You are not an admin to use this command.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModAction {
    Mute,
    Unmute,
    Ban,
    Unban,
    Kick,
}

impl ModAction {
    fn verb(self) -> &'static str {
        match self {
            ModAction::Mute => "mute",
            ModAction::Unmute => "unmute",
            ModAction::Ban => "ban",
            ModAction::Unban => "unban",
            ModAction::Kick => "kick",
        }
    }

    fn usage(self) -> String {
        format!(
            "\u{274c} Please reply to the user you want to {}.",
            self.verb()
        )
    }

    fn confirmation(self, target: &UserSnapshot) -> String {
        let (emoji, past) = match self {
            ModAction::Mute => ("\u{1f507}", "muted"),
            ModAction::Unmute => ("\u{1f50a}", "unmuted"),
            ModAction::Ban => ("\u{1f528}", "banned"),
            ModAction::Unban => ("\u{2705}", "unbanned"),
            ModAction::Kick => ("\u{1f9b6}", "kicked"),
        };
        format!("{emoji} User {} has been {past}.", mention(target))
    }
}

/// Shared flow for mute/unmute/ban/unban/kick: admin gate, reply-target
/// precondition, external operation, confirmation or error reply.
pub async fn moderate(r: &Router, inv: &CommandInvocation, action: ModAction) -> Result<()> {
    if !check_admin(r.client.as_ref(), inv.chat.id, inv.sender.id)
        .await
        .is_authorized()
    {
        r.client.send_text(inv.chat.id, NOT_ADMIN).await?;
        return Ok(());
    }

    let Some(target) = &inv.reply_to else {
        r.client.send_text(inv.chat.id, &action.usage()).await?;
        return Ok(());
    };

    match apply(r, inv.chat.id, target.sender.id, action).await {
        Ok(()) => {
            r.client
                .send_text(inv.chat.id, &action.confirmation(&target.sender))
                .await?;
        }
        Err(e) => {
            let reply = format!("\u{274c} Failed to {}: {e}", action.verb());
            r.client.send_text(inv.chat.id, &reply).await?;
        }
    }

    Ok(())
}

async fn apply(r: &Router, chat: ChatId, user: UserId, action: ModAction) -> Result<()> {
    match action {
        ModAction::Mute => r.client.restrict_member(chat, user, false).await,
        ModAction::Unmute => r.client.restrict_member(chat, user, true).await,
        ModAction::Ban => r.client.ban_member(chat, user).await,
        ModAction::Unban => r.client.unban_member(chat, user).await,
        ModAction::Kick => {
            // Non-persistent removal: remove, then immediately lift the ban.
            r.client.ban_member(chat, user).await?;
            r.client.unban_member(chat, user).await
        }
    }
}

/// `/del`: delete the replied-to message, then the command message itself.
/// Silent on success and silent without authorization or a reply target.
pub async fn delete(r: &Router, inv: &CommandInvocation) -> Result<()> {
    if !check_admin(r.client.as_ref(), inv.chat.id, inv.sender.id)
        .await
        .is_authorized()
    {
        return Ok(());
    }

    let Some(target) = &inv.reply_to else {
        return Ok(());
    };

    r.client.delete_message(target.message).await?;
    r.client.delete_message(inv.message).await?;
    Ok(())
}
