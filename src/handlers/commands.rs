use clap::Subcommand;
use tracing::{info, instrument};

use crate::handlers::{report, Notification, Notifier};
use crate::models::{format_price, Cart, ProductId, RepositoryError, UpdateProductAmount};
use crate::services::CartContext;

/// Operations the command line exposes on the cart
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add {
        /// Catalog id of the product
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog id of the product
        product_id: ProductId,
    },
    /// Set the amount of a product already in the cart
    Update {
        /// Catalog id of the product
        product_id: ProductId,
        /// New amount (at least 1, at most the available stock)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Empty the cart
    Clear,
}

/// Result of running one command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The command ran; carries the cart afterwards
    Completed(Cart),
    /// The cart rejected the command; the shopper was notified
    Rejected(Notification),
}

/// Run `command` against the shared cart.
///
/// Cart failures are reported through `notifier` and returned as
/// [`CommandOutcome::Rejected`]; only a failure to clear storage is an error.
#[instrument(skip(context, notifier))]
pub async fn execute(
    context: &CartContext,
    command: CartCommand,
    notifier: &dyn Notifier,
) -> Result<CommandOutcome, RepositoryError> {
    let result = match command {
        CartCommand::Show => Ok(()),
        CartCommand::Add { product_id } => context.add_product(product_id).await,
        CartCommand::Remove { product_id } => context.remove_product(product_id).await,
        CartCommand::Update { product_id, amount } => {
            context
                .update_product_amount(UpdateProductAmount {
                    product_id,
                    amount: requested_amount(amount),
                })
                .await
        }
        CartCommand::Clear => {
            context.clear_cart().await?;
            Ok(())
        }
    };

    match result {
        Ok(()) => {
            info!("Command completed");
            Ok(CommandOutcome::Completed(context.cart().await))
        }
        Err(err) => Ok(CommandOutcome::Rejected(report(&err, notifier))),
    }
}

/// Clamp a command-line amount into the store's range.
///
/// Negative amounts become 0 and are rejected as below the minimum; amounts
/// past `u32::MAX` saturate and fail the stock check.
fn requested_amount(amount: i64) -> u32 {
    u32::try_from(amount.max(0)).unwrap_or(u32::MAX)
}

/// Render the cart as a plain-text table with line subtotals and the total
pub fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut lines = vec![format!(
        "{:>4}  {:<50}  {:>12}  {:>6}  {:>14}",
        "ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"
    )];
    lines.extend(cart.items().iter().map(|item| {
        format!(
            "{:>4}  {:<50}  {:>12}  {:>6}  {:>14}",
            item.id,
            item.title,
            format_price(item.price),
            item.amount,
            format_price(item.subtotal())
        )
    }));
    lines.push(format!(
        "{} products, {} items, total {}",
        cart.size(),
        cart.total_amount(),
        format_price(cart.total())
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
