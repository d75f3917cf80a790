use super::{api_error, authed_client, status::print_state};
use crate::{
    libs::{
        formatter::format_time,
        messages::Message,
        session::{SessionReconciler, SessionState},
    },
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct OutArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// Clocks in after checking today's state with the server.
pub async fn clock_in() -> Result<()> {
    let reconciler = SessionReconciler::new(authed_client()?);
    match reconciler.refresh().await.map_err(api_error)? {
        SessionState::NotClockedIn => {
            let outcome = reconciler.clock_in().await.map_err(api_error)?;
            msg_success!(Message::ClockedIn(format_time(&outcome.clock_in_at)));
        }
        SessionState::ClockedIn { clock_in_at, .. } => {
            msg_warning!(Message::AlreadyClockedIn(format_time(&clock_in_at)));
        }
        SessionState::Completed { .. } => msg_warning!(Message::AlreadyCompleted),
    }
    Ok(())
}

/// Clocks out after an explicit confirmation, unless `--yes` is given.
pub async fn clock_out(args: OutArgs) -> Result<()> {
    let reconciler = SessionReconciler::new(authed_client()?);
    let (attendance_id, clock_in_at) = match reconciler.refresh().await.map_err(api_error)? {
        SessionState::ClockedIn {
            attendance_id,
            clock_in_at,
        } => (attendance_id, clock_in_at),
        SessionState::NotClockedIn => {
            msg_warning!(Message::NotClockedInYet);
            return Ok(());
        }
        SessionState::Completed { .. } => {
            msg_warning!(Message::AlreadyCompleted);
            return Ok(());
        }
    };

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmClockOut(format_time(&clock_in_at)).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::ClockOutCancelled);
        return Ok(());
    }

    reconciler.clock_out(&attendance_id).await.map_err(api_error)?;
    let state = reconciler.state();
    if let SessionState::Completed { clock_out_at, .. } = &state {
        msg_success!(Message::ClockedOut(format_time(clock_out_at)));
    }
    print_state(&state);
    Ok(())
}
