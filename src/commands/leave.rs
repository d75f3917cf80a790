use super::{api_error, authed_client};
use crate::{
    api::NewLeaveRequest,
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct LeaveArgs {
    #[command(subcommand)]
    command: LeaveCommands,
}

#[derive(Debug, Subcommand)]
enum LeaveCommands {
    #[command(about = "List your leave requests")]
    List,
    #[command(about = "List the available leave types")]
    Types,
    #[command(about = "Submit a leave request")]
    Request {
        /// Leave type name, e.g. "Annual Leave"
        #[arg(short = 't', long = "type")]
        leave_type: String,
        /// First day of leave (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last day of leave (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Reason, at least 10 characters
        #[arg(short, long)]
        reason: String,
    },
}

pub async fn cmd(args: LeaveArgs) -> Result<()> {
    let client = authed_client()?;
    match args.command {
        LeaveCommands::List => {
            let requests = client.leave_requests().await.map_err(api_error)?;
            if requests.is_empty() {
                msg_info!(Message::LeaveRequestsEmpty);
                return Ok(());
            }
            msg_print!(Message::LeaveRequestsHeader, true);
            View::leave_requests(&requests)?;
        }
        LeaveCommands::Types => {
            let types = client.leave_types().await.map_err(api_error)?;
            msg_print!(Message::LeaveTypesHeader, true);
            View::leave_types(&types)?;
        }
        LeaveCommands::Request {
            leave_type,
            from,
            to,
            reason,
        } => {
            let request = NewLeaveRequest {
                leave_type,
                start_date: from,
                end_date: to,
                reason,
            };
            client.submit_leave_request(&request).await.map_err(api_error)?;
            msg_success!(Message::LeaveRequestSubmitted(request.days()));
        }
    }
    Ok(())
}
