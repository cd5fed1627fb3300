//! Sign in, sign out and show who is signed in.

use course_shop_backend::{GuardOutcome, SessionStore, verify_admin};
use course_shop_core::LoginForm;
use course_shop_core::validation::validate_login;

use super::{CommandError, Context};

/// Exchange credentials for a token and store it.
///
/// # Errors
///
/// Returns error if the input is invalid, the backend rejects the
/// credentials or the session file cannot be written.
pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<(), CommandError> {
    let form = LoginForm {
        email: email.to_owned(),
        password: password.to_owned(),
    };
    let errors = validate_login(&form);
    if !errors.is_empty() {
        let messages: Vec<&str> = errors.iter().map(|(_, message)| message).collect();
        return Err(CommandError::Invalid(messages.join("; ")));
    }

    let session = ctx.client.login(form.email.trim(), &form.password).await?;
    let name = session.admin.name.clone();
    ctx.store.save(session).await?;

    tracing::info!("Signed in as {}", name);
    tracing::info!("Session saved to {}", ctx.store.path().display());
    Ok(())
}

/// Forget the stored token.
///
/// # Errors
///
/// Returns error if the session file cannot be removed.
pub async fn logout(ctx: &Context) -> Result<(), CommandError> {
    ctx.store.clear().await?;
    tracing::info!("Signed out");
    Ok(())
}

/// Verify the stored token and print the admin it belongs to.
///
/// A rejected or unverifiable token is cleared, exactly as the admin panel
/// does.
///
/// # Errors
///
/// Returns [`CommandError::NotSignedIn`] unless the token verifies.
pub async fn whoami(ctx: &Context) -> Result<(), CommandError> {
    match verify_admin(&ctx.store, &ctx.client).await {
        GuardOutcome::Authenticated(admin) => {
            tracing::info!("Signed in as {} <{}>", admin.name, admin.email);
            Ok(())
        }
        GuardOutcome::RedirectToLogin => Err(CommandError::NotSignedIn),
    }
}
