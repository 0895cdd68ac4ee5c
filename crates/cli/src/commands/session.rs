//! Session commands, each driving the page controller a browser would use.

use std::sync::Arc;

use babyshoe_storefront::auth::{
    AuthFormController, AuthFormInput, ResetFormController, ResetFormInput, SubmitSuccess,
};
use babyshoe_storefront::nav::NavPresenter;
use url::Url;

use super::{CommandError, Context};
use crate::terminal::{TerminalForm, TerminalNav};

fn nav(ctx: &Context, page: Url) -> NavPresenter {
    NavPresenter::new(
        ctx.api.clone(),
        Arc::new(TerminalNav),
        Context::navigator(page),
        ctx.notifications(),
        ctx.cart(),
        ctx.config.site.clone(),
    )
}

fn auth_form(ctx: &Context) -> AuthFormController {
    AuthFormController::new(
        ctx.api.clone(),
        Arc::new(TerminalForm),
        Context::navigator(ctx.config.site.login()),
        ctx.config.site.clone(),
        &ctx.config.timings,
    )
}

/// Show session state and cart badge as the landing page would.
pub async fn status(ctx: &Context) -> Result<(), CommandError> {
    let mut nav = nav(ctx, ctx.config.site.landing());
    if let Some(name) = nav.load().await.display_name() {
        tracing::info!(name, "Session user");
    }
    Ok(())
}

/// Log in, then render the landing page the login redirects to.
pub async fn login(ctx: &Context, email: String, password: String) -> Result<(), CommandError> {
    let mut form = auth_form(ctx);
    if form.redirect_if_logged_in().await {
        tracing::info!("Already logged in");
        return Ok(());
    }

    if form.submit(AuthFormInput::new(email, password)).await? == SubmitSuccess::LoggedIn {
        nav(ctx, ctx.config.site.landing_after_login()).load().await;
    }
    Ok(())
}

pub async fn register(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
) -> Result<(), CommandError> {
    let mut form = auth_form(ctx);
    form.click_switch();
    form.submit(AuthFormInput::new(email, password).with_name(name))
        .await?;
    Ok(())
}

pub async fn forgot_password(ctx: &Context, email: String) -> Result<(), CommandError> {
    let mut form = auth_form(ctx);
    form.click_forgot();
    form.submit(AuthFormInput::new(email, String::new())).await?;
    Ok(())
}

/// Submit the reset form as if opened from `link`.
pub async fn reset_password(
    ctx: &Context,
    link: &str,
    password: String,
    confirmation: String,
) -> Result<(), CommandError> {
    let page = Url::parse(link).map_err(|e| CommandError::InvalidLink {
        link: link.to_string(),
        reason: e.to_string(),
    })?;

    let mut form = ResetFormController::new(
        ctx.api.clone(),
        Arc::new(TerminalForm),
        Context::navigator(page),
        ctx.config.site.clone(),
        &ctx.config.timings,
    );
    form.submit(ResetFormInput::new(password, confirmation))
        .await?;
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<(), CommandError> {
    nav(ctx, ctx.config.site.landing()).logout().await?;
    ctx.end_session();
    Ok(())
}
