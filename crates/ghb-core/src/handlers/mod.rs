//! Event handlers.
//!
//! Each handler performs the authorization/precondition checks for one
//! command or event kind, calls the chat-client port, and replies. Failures
//! of the moderation call itself are turned into an error reply; failures of
//! the reply are propagated to the router, which logs them.

pub mod broadcast;
pub mod callback;
pub mod info;
pub mod inline;
pub mod keywords;
pub mod membership;
pub mod moderation;
pub mod rules;

#[cfg(test)]
pub(crate) mod testkit;
