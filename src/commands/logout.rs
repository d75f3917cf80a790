use crate::{api::AuthStore, libs::messages::Message, msg_success};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    AuthStore::default().clear()?;
    msg_success!(Message::LoggedOut);
    Ok(())
}
