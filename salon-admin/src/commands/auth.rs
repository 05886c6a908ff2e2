//! login / logout / status

use anyhow::Context;
use chrono::{DateTime, Utc};
use salon_client::RestClient;

use crate::session::{SessionFile, SessionFileError};

pub async fn login(
    client: &RestClient,
    session_file: &SessionFile,
    email: &str,
    password: &str,
) -> anyhow::Result<String> {
    // auth failures are reported as-is and never reach any store
    let session = client.sign_in_with_password(email, password).await?;
    session_file
        .save(&session)
        .with_context(|| format!("saving session to {}", session_file.path().display()))?;
    Ok(format!("Signed in as {}\n", session.email().unwrap_or(email)))
}

pub async fn logout(client: &RestClient, session_file: &SessionFile) -> anyhow::Result<String> {
    match session_file.restore_into(client).await {
        Ok(_) => {
            if let Err(e) = client.sign_out().await {
                tracing::warn!("Remote sign-out failed, session dropped locally: {}", e);
            }
        }
        Err(SessionFileError::AuthenticationRequired) => {}
        Err(e) => return Err(e.into()),
    }
    session_file.delete()?;
    Ok("Signed out\n".to_string())
}

pub async fn status(client: &RestClient, session_file: &SessionFile) -> anyhow::Result<String> {
    match session_file.restore_into(client).await {
        Ok(session) => {
            let expires = session
                .expires_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                .map(|t| format!(" (expires {})", t.format("%Y-%m-%d %H:%M UTC")))
                .unwrap_or_default();
            Ok(format!(
                "Signed in as {}{}\n",
                session.email().unwrap_or("unknown user"),
                expires
            ))
        }
        Err(SessionFileError::AuthenticationRequired) => Ok("Not signed in\n".to_string()),
        Err(e) => Err(e.into()),
    }
}
