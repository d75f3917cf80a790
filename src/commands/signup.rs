use super::{anonymous_client, api_error};
use crate::{
    api::{AuthStore, SignupForm},
    libs::messages::Message,
    msg_success,
};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};

pub async fn cmd() -> Result<()> {
    let theme = ColorfulTheme::default();
    let form = SignupForm {
        name: Input::with_theme(&theme)
            .with_prompt(Message::PromptName.to_string())
            .interact_text()?,
        email: Input::with_theme(&theme)
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
        password: Password::with_theme(&theme)
            .with_prompt(Message::PromptPassword.to_string())
            .interact()?,
        confirm_password: Password::with_theme(&theme)
            .with_prompt(Message::PromptConfirmPassword.to_string())
            .interact()?,
    };

    let auth = anonymous_client()?.signup(&form).await.map_err(api_error)?;
    AuthStore::default().save(&auth)?;

    msg_success!(Message::SignedUp(auth.display_name().to_string()));
    Ok(())
}
