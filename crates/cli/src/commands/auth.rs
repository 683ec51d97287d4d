use clap::Args;
use gearcart_client::AuthOutcome;

use crate::context::AppContext;

use super::CommandResult;

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

pub async fn login(ctx: &AppContext, args: LoginArgs) -> CommandResult {
    match ctx.client.login(&args.email, &args.password).await {
        Ok(AuthOutcome::Authenticated { token, identity }) => {
            ctx.session.login(&token, &identity);
            ctx.client.set_token(token);

            // Opening the managers while authenticated runs the server-wins
            // resync, so the account state replaces whatever the anonymous
            // session accumulated locally. Running it twice is harmless.
            let cart = ctx.cart().await;
            let wishlist = ctx.wishlist().await;

            CommandResult::success(format!(
                "signed in as {} — cart synced ({} items), wishlist synced ({} items)",
                identity.email,
                cart.count(),
                wishlist.count()
            ))
        }
        Ok(AuthOutcome::Rejected { message }) => CommandResult::failure("login", message, 1),
        Err(error) => CommandResult::failure("login", error.to_string(), 1),
    }
}

pub fn logout(ctx: &AppContext) -> CommandResult {
    ctx.session.logout();
    ctx.client.clear_token();
    CommandResult::success("signed out; token, identity, cart, and wishlist cleared locally")
}
