use crate::{
    auth::check_admin, chat::types::CommandInvocation, formatting::escape_html, router::Router,
    Result,
};

pub async fn set_rules(r: &Router, inv: &CommandInvocation) -> Result<()> {
    if !check_admin(r.client.as_ref(), inv.chat.id, inv.sender.id)
        .await
        .is_authorized()
    {
        r.client
            .send_text(inv.chat.id, "\u{274c} You must be an admin to set rules.")
            .await?;
        return Ok(());
    }

    if inv.args.is_empty() {
        r.client
            .send_text(
                inv.chat.id,
                "\u{274c} Usage: <code>/setrules Your new rules here</code>",
            )
            .await?;
        return Ok(());
    }

    let rules = inv.args.join(" ");
    r.rules.set(inv.chat.id, rules)?;
    r.client
        .send_text(inv.chat.id, "\u{2705} Group rules have been updated!")
        .await?;
    Ok(())
}

pub async fn get_rules(r: &Router, inv: &CommandInvocation) -> Result<()> {
    let reply = match r.rules.get(inv.chat.id) {
        Some(rules) => format!(
            "<b>Current Group Rules:</b>\n\n{}",
            escape_html(&rules)
        ),
        None => "\u{274c} No rules have been set for this group yet.".to_string(),
    };

    r.client.send_text(inv.chat.id, &reply).await?;
    Ok(())
}
