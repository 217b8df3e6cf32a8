//! Create-user command handler

use anyhow::bail;

use crate::config::Config;
use crate::db::Store;
use crate::forms::LoginForm;

pub async fn cmd_create_user(config: &Config, email: &str, password: &str) -> anyhow::Result<()> {
    let form = LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    };
    let (email, password) = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => bail!("Invalid account: {errors}"),
    };

    let store = Store::open(&config.general).await?;
    if store.get_user_by_email(&email).await?.is_some() {
        bail!("A user with email {email} already exists");
    }

    let user = store
        .create_user(&email, &password, &config.security)
        .await?;

    println!("Created user #{} ({})", user.id, user.email);
    Ok(())
}
