use crate::{chat::types::MembershipEvent, formatting::mention, router::Router, Result};

/// Welcome a newly joined member. Bots are not greeted.
pub async fn welcome(r: &Router, ev: &MembershipEvent) -> Result<()> {
    if ev.member.is_bot {
        return Ok(());
    }

    let text = format!("Hello {}, welcome to the group!", mention(&ev.member));
    r.client.send_text(ev.chat.id, &text).await?;
    Ok(())
}

/// Say goodbye to a departing member. Bots leave silently.
pub async fn farewell(r: &Router, ev: &MembershipEvent) -> Result<()> {
    if ev.member.is_bot {
        return Ok(());
    }

    let text = format!("Goodbye, {}! We will miss you.", mention(&ev.member));
    r.client.send_text(ev.chat.id, &text).await?;
    Ok(())
}
