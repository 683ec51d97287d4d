use clap::Subcommand;
use gearcart_core::{AccessoryId, WishlistManager};

use crate::context::AppContext;

use super::cart::ItemArgs;
use super::CommandResult;

#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    #[command(about = "List wishlisted accessories")]
    List,
    #[command(about = "Add an accessory (no-op if already wishlisted)")]
    Add(ItemArgs),
    #[command(about = "Remove an accessory from the wishlist")]
    Remove { accessory_id: String },
    #[command(about = "Move an accessory from the wishlist into the cart")]
    MoveToCart { accessory_id: String },
    #[command(about = "Empty the wishlist")]
    Clear,
}

pub async fn run(ctx: &AppContext, command: WishlistCommand) -> CommandResult {
    let mut wishlist = ctx.wishlist().await;

    match command {
        WishlistCommand::List => CommandResult::success(render(&wishlist)),
        WishlistCommand::Add(item) => {
            wishlist.add(item.into_accessory()).await;
            CommandResult::success(render(&wishlist))
        }
        WishlistCommand::Remove { accessory_id } => {
            wishlist.remove(&AccessoryId(accessory_id)).await;
            CommandResult::success(render(&wishlist))
        }
        WishlistCommand::MoveToCart { accessory_id } => {
            let mut cart = ctx.cart().await;
            let id = AccessoryId(accessory_id);
            if wishlist.move_to_cart(&id, &mut cart).await {
                CommandResult::success(format!(
                    "moved {id} to cart ({} cart items, {} wishlisted)",
                    cart.count(),
                    wishlist.count()
                ))
            } else {
                CommandResult::failure("wishlist", format!("{id} is not wishlisted"), 1)
            }
        }
        WishlistCommand::Clear => {
            wishlist.clear().await;
            CommandResult::success("wishlist cleared")
        }
    }
}

fn render(wishlist: &WishlistManager) -> String {
    if wishlist.is_empty() {
        return "wishlist is empty".to_string();
    }
    let mut output = String::new();
    for item in wishlist.items() {
        output.push_str(&format!(
            "  [{}] {} — {}\n",
            item.accessory_id, item.accessory_name, item.price
        ));
    }
    output.push_str(&format!("{} wishlisted", wishlist.count()));
    output
}
