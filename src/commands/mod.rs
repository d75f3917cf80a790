//! Command-line interface.
//!
//! Each subcommand lives in its own module exposing `cmd(args)`. Commands
//! that talk to the server build an [`ApiClient`] from the configured API
//! URL and, unless they are login or signup, the stored [`AuthContext`].

pub mod calendar;
pub mod clock;
pub mod init;
pub mod leave;
pub mod log;
pub mod login;
pub mod logout;
pub mod signup;
pub mod status;

use crate::api::{ApiClient, ApiError, AuthContext, AuthStore, HttpTransport};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the attendance server")]
    Init,
    #[command(about = "Create an account")]
    Signup,
    #[command(about = "Log in and store the session")]
    Login(login::LoginArgs),
    #[command(about = "Forget the stored session")]
    Logout,
    #[command(about = "Show today's attendance")]
    Status,
    #[command(about = "Clock in for today")]
    In,
    #[command(about = "Clock out for today")]
    Out(clock::OutArgs),
    #[command(about = "Show the monthly attendance calendar")]
    Calendar(calendar::CalendarArgs),
    #[command(about = "Show clock-in and clock-out events, newest first")]
    Log,
    #[command(about = "List and request leave", arg_required_else_help = true)]
    Leave(leave::LeaveArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Signup => signup::cmd().await,
            Commands::Login(args) => login::cmd(args).await,
            Commands::Logout => logout::cmd(),
            Commands::Status => status::cmd().await,
            Commands::In => clock::clock_in().await,
            Commands::Out(args) => clock::clock_out(args).await,
            Commands::Calendar(args) => calendar::cmd(args).await,
            Commands::Log => log::cmd().await,
            Commands::Leave(args) => leave::cmd(args).await,
        }
    }
}

fn transport() -> Result<HttpTransport> {
    let api_url = Config::read()?.api_url();
    msg_debug!(Message::UsingApiUrl(api_url.clone()));
    Ok(HttpTransport::new(api_url))
}

/// Client for login and signup.
pub(crate) fn anonymous_client() -> Result<ApiClient<HttpTransport>> {
    Ok(ApiClient::anonymous(transport()?))
}

/// Client carrying the stored session. Fails when nobody is logged in.
pub(crate) fn authed_client() -> Result<ApiClient<HttpTransport>> {
    let auth: AuthContext = AuthStore::default()
        .load()?
        .ok_or_else(|| api_error(ApiError::Unauthenticated))?;
    Ok(ApiClient::new(transport()?, auth))
}

impl From<&ApiError> for Message {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Network(detail) => Message::NetworkFailure(detail.clone()),
            ApiError::ServerRejected { message, .. } => Message::ServerRejected(message.clone()),
            ApiError::Decode(detail) => Message::UnexpectedResponse(detail.clone()),
            ApiError::Precondition { .. } => Message::OperationNotAllowed(err.to_string()),
            ApiError::Unauthenticated => Message::NotLoggedIn,
            ApiError::InvalidInput(detail) => Message::InvalidInput(detail.clone()),
        }
    }
}

/// Turns an engine error into the user-facing `anyhow` error.
pub(crate) fn api_error(err: ApiError) -> anyhow::Error {
    msg_error_anyhow!(Message::from(&err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_messages() {
        let rejected = ApiError::ServerRejected {
            status: 422,
            message: "Already clocked in".into(),
        };
        assert_eq!(api_error(rejected).to_string(), "Already clocked in");
        assert_eq!(
            Message::from(&ApiError::Unauthenticated).to_string(),
            Message::NotLoggedIn.to_string()
        );
        assert!(api_error(ApiError::Network("HTTP 502 Bad Gateway".into()))
            .to_string()
            .contains("HTTP 502"));
    }

    #[test]
    fn test_cli_parses_calendar_args() {
        let cli = Cli::try_parse_from(["punchclock", "calendar", "--month", "2024-03", "--day", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Calendar(_)));
    }
}
