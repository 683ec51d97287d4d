use clap::{Args, Subcommand};
use gearcart_core::{begin_checkout, Accessory, AccessoryId, CartManager};
use rust_decimal::Decimal;

use crate::context::AppContext;

use super::CommandResult;

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    #[command(about = "List cart lines with the running total")]
    List,
    #[command(about = "Add an accessory (repeat adds increment the quantity)")]
    Add(ItemArgs),
    #[command(about = "Remove an accessory from the cart")]
    Remove { accessory_id: String },
    #[command(about = "Set the quantity of a line already in the cart (0 removes it)")]
    SetQuantity { accessory_id: String, quantity: u32 },
    #[command(about = "Empty the cart")]
    Clear,
    #[command(about = "Run the checkout guard and show the order summary")]
    Checkout,
}

#[derive(Debug, Args)]
pub struct ItemArgs {
    pub accessory_id: String,
    #[arg(long, help = "Display name (defaults to the id)")]
    pub name: Option<String>,
    #[arg(long, default_value = "0", help = "Unit price; authenticated sessions get the authoritative price from the server on resync")]
    pub price: Decimal,
}

impl ItemArgs {
    pub fn into_accessory(self) -> Accessory {
        let name = self.name.unwrap_or_else(|| self.accessory_id.clone());
        Accessory::new(self.accessory_id, name, self.price)
    }
}

pub async fn run(ctx: &AppContext, command: CartCommand) -> CommandResult {
    let mut cart = ctx.cart().await;

    match command {
        CartCommand::List => CommandResult::success(render(&cart)),
        CartCommand::Add(item) => {
            cart.add(item.into_accessory()).await;
            CommandResult::success(render(&cart))
        }
        CartCommand::Remove { accessory_id } => {
            cart.remove(&AccessoryId(accessory_id)).await;
            CommandResult::success(render(&cart))
        }
        CartCommand::SetQuantity { accessory_id, quantity } => {
            cart.set_quantity(&AccessoryId(accessory_id), quantity).await;
            CommandResult::success(render(&cart))
        }
        CartCommand::Clear => {
            cart.clear().await;
            CommandResult::success("cart cleared")
        }
        CartCommand::Checkout => match begin_checkout(&cart) {
            Ok(intent) => {
                let mut output = String::from("proceeding to checkout:\n");
                for line in &intent.lines {
                    output.push_str(&format!(
                        "  {} x{} — {}\n",
                        line.accessory.accessory_name,
                        line.quantity,
                        line.subtotal()
                    ));
                }
                output.push_str(&format!("{} items, total {}", intent.count, intent.total));
                CommandResult::success(output)
            }
            Err(error) => CommandResult::failure("checkout", error.to_string(), 1),
        },
    }
}

fn render(cart: &CartManager) -> String {
    if cart.is_empty() {
        return "cart is empty".to_string();
    }
    let mut output = String::new();
    for line in cart.lines() {
        output.push_str(&format!(
            "  [{}] {} x{} @ {} = {}\n",
            line.accessory.accessory_id,
            line.accessory.accessory_name,
            line.quantity,
            line.accessory.price,
            line.subtotal()
        ));
    }
    output.push_str(&format!("{} items, total {}", cart.count(), cart.total()));
    output
}
