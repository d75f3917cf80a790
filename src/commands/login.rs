use super::{anonymous_client, api_error};
use crate::{
    api::AuthStore,
    libs::messages::Message,
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email or login name; prompted for when omitted
    #[arg(short, long)]
    email: Option<String>,
}

pub async fn cmd(args: LoginArgs) -> Result<()> {
    let theme = ColorfulTheme::default();
    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;

    let auth = anonymous_client()?
        .login(email.trim(), &password)
        .await
        .map_err(api_error)?;
    AuthStore::default().save(&auth)?;

    msg_success!(Message::LoggedIn(auth.display_name().to_string()));
    Ok(())
}
