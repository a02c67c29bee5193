//! In-memory integration tests for account flows with Argon2 hashing.

use super::helpers::{Accounts, accounts, register, registration};
use rstest::rstest;
use taskboard::account::{
    services::{AccountError, UpdateProfileRequest},
    views::UserView,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_can_sign_in(accounts: Accounts) -> Result<(), eyre::Report> {
    let user = register(&accounts, "lin@example.org").await?;

    eyre::ensure!(
        user.password_hash().starts_with("$argon2id$"),
        "password should be stored as an Argon2id PHC string"
    );
    let signed_in = accounts
        .authenticate("lin@example.org", "s3cure-enough")
        .await?;
    eyre::ensure!(signed_in.id() == user.id(), "signed in as a different user");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_rejected(accounts: Accounts) -> Result<(), eyre::Report> {
    register(&accounts, "lin@example.org").await?;

    let result = accounts.authenticate("lin@example.org", "guessing").await;

    eyre::ensure!(
        matches!(result, Err(AccountError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_registration_is_rejected(accounts: Accounts) -> Result<(), eyre::Report> {
    register(&accounts, "lin@example.org").await?;

    let result = accounts
        .register(registration("Lin@Example.org", "another-secret"))
        .await;

    eyre::ensure!(
        matches!(result, Err(AccountError::DuplicateEmail(_))),
        "expected DuplicateEmail, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn short_password_is_rejected(accounts: Accounts) -> Result<(), eyre::Report> {
    let result = accounts
        .register(registration("lin@example.org", "short"))
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("short password accepted"))?;
    eyre::ensure!(err.is_validation(), "expected a validation error, got {err:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_view_reflects_updates(accounts: Accounts) -> Result<(), eyre::Report> {
    let user = register(&accounts, "lin@example.org").await?;

    accounts
        .update_profile(
            user.id(),
            UpdateProfileRequest {
                first_name: Some("Lin".to_owned()),
                last_name: Some("Chen".to_owned()),
            },
        )
        .await?;
    let view = UserView::from(&accounts.profile(user.id()).await?);

    eyre::ensure!(view.name == "Lin Chen", "unexpected name {}", view.name);
    let json = serde_json::to_value(&view)?;
    eyre::ensure!(
        json.get("password_hash").is_none(),
        "profile view must not expose the password hash"
    );
    Ok(())
}
