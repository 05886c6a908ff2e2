//! Command handlers
//!
//! Tab commands run against a [`Backend`] and return the text to print, so
//! they can be driven by the in-memory backend in tests.

pub mod auth;
pub mod contact;
pub mod content;
pub mod gallery;
pub mod hours;
pub mod services;
pub mod site;

use anyhow::bail;
use salon_client::{Backend, RestClient};

use crate::cli::{Cli, Command};
use crate::session::SessionFile;

/// Run one parsed command
pub async fn dispatch(cli: Cli, client: RestClient) -> anyhow::Result<String> {
    let session_file = SessionFile::new(&cli.session_file);

    match cli.command {
        Command::Login { email, password } => {
            auth::login(&client, &session_file, &email, &password).await
        }
        Command::Logout => auth::logout(&client, &session_file).await,
        Command::Status => auth::status(&client, &session_file).await,
        Command::Site { slide } => site::run(&Backend::rest(client), slide).await,
        Command::Services(cmd) => services::run(cmd, &gated(client, &session_file).await?).await,
        Command::Gallery(cmd) => gallery::run(cmd, &gated(client, &session_file).await?).await,
        Command::Hours(cmd) => hours::run(cmd, &gated(client, &session_file).await?).await,
        Command::Content(cmd) => content::run(cmd, &gated(client, &session_file).await?).await,
        Command::Contact(cmd) => contact::run(cmd, &gated(client, &session_file).await?).await,
    }
}

/// Restore the stored session; nothing behind the gate runs without one
async fn gated(client: RestClient, session_file: &SessionFile) -> anyhow::Result<Backend> {
    let session = session_file.restore_into(&client).await?;
    tracing::debug!(email = session.email().unwrap_or("-"), "Session restored");
    Ok(Backend::rest(client))
}

/// Turn a store error left by a fetch into a command failure
pub(crate) fn ensure_loaded(error: Option<&str>) -> anyhow::Result<()> {
    if let Some(message) = error {
        bail!("{message}");
    }
    Ok(())
}
