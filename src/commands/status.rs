use super::{api_error, authed_client};
use crate::{
    libs::{
        formatter::format_time,
        messages::Message,
        session::{SessionReconciler, SessionState},
    },
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let reconciler = SessionReconciler::new(authed_client()?);
    let state = reconciler.refresh().await.map_err(api_error)?;
    print_state(&state);
    Ok(())
}

pub(crate) fn print_state(state: &SessionState) {
    match state {
        SessionState::NotClockedIn => msg_info!(Message::SessionNotClockedIn),
        SessionState::ClockedIn { clock_in_at, .. } => {
            msg_info!(Message::SessionClockedIn(format_time(clock_in_at)))
        }
        SessionState::Completed {
            clock_in_at: Some(clock_in_at),
            clock_out_at,
        } => msg_info!(Message::SessionCompleted(format_time(clock_in_at), format_time(clock_out_at))),
        SessionState::Completed { .. } => msg_info!(Message::SessionCompletedNoTimes),
    }
    if let Some(worked) = state.worked() {
        msg_print!(Message::WorkedToday(worked.to_string()));
    }
}
