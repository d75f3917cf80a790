use super::{api_error, authed_client};
use crate::{
    libs::{
        feed::{build_feed, most_recent_first},
        messages::Message,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let records = authed_client()?.attendance().await.map_err(api_error)?;
    let feed = build_feed(&most_recent_first(records));
    if feed.is_empty() {
        msg_info!(Message::LogFeedEmpty);
        return Ok(());
    }

    msg_print!(Message::LogFeedHeader, true);
    View::log_feed(&feed)?;
    Ok(())
}
