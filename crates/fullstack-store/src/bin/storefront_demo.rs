//! # Storefront Demo
//!
//! Walks one customer through the storefront from the command line: domain
//! search, hosting plan, cart edits and checkout.
//!
//! ## Usage
//! ```bash
//! # Run with the default config location
//! cargo run -p fullstack-store --bin storefront-demo
//!
//! # Use a specific config file
//! cargo run -p fullstack-store --bin storefront-demo -- --config ./storefront.toml
//!
//! # More log output
//! RUST_LOG=debug cargo run -p fullstack-store --bin storefront-demo
//! ```

use std::env;
use std::path::PathBuf;

use fullstack_core::{search_domains, BillingCycle, HostingPlan, StaticAvailability, HOSTING_PLANS};
use fullstack_store::{
    confirm_order, init_tracing, prepare_checkout, ApiError, CartStore, CartView, SessionState,
    StorefrontConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut query = String::from("mybrand");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--search" | "-s" => {
                if i + 1 < args.len() {
                    query = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Fullstack Storefront Demo");
                println!();
                println!("Usage: storefront-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>    Config file (default: platform config dir)");
                println!("  -s, --search <NAME>    Domain name to search for (default: mybrand)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    let config = StorefrontConfig::load_or_default(config_path);
    let cart = CartStore::new(config.tax_rate());
    let session = SessionState::new();
    let mut updates = cart.subscribe();

    println!("{} Storefront Demo", config.store.name);
    println!("================================");
    println!();

    // Domain search
    println!("Searching for \"{}\"...", query);
    let quotes = search_domains(&StaticAvailability::default(), &query)?;
    for quote in &quotes {
        match quote.price {
            Some(price) if quote.available => println!(
                "  ✓ {:<20} {}/yr{}",
                quote.name,
                config.format_currency(price),
                if quote.premium { "  (premium)" } else { "" }
            ),
            _ => println!("  ✗ {:<20} taken", quote.name),
        }
    }

    if let Some(quote) = quotes.iter().find(|q| q.available) {
        cart.add_item(quote.to_cart_item()?);
        println!("Added {} to cart", quote.name);
    }

    // Hosting plans
    println!();
    println!("Hosting plans:");
    for plan in HOSTING_PLANS {
        println!(
            "  {} {:<12} {}/mo  {}/yr{}",
            plan.id,
            plan.name,
            config.format_currency(plan.monthly),
            config.format_currency(plan.yearly),
            if plan.popular { "  ★ popular" } else { "" }
        );
    }

    let plan = HostingPlan::find(2)?;
    let view = cart.add_item(plan.to_cart_item(BillingCycle::Monthly)?.with_quantity(2));
    println!("Added 2 × {} Hosting to cart", plan.name);
    print_cart(&config, &view);

    // Cart edits
    let view = cart.update_quantity(&plan.cart_item_id(), 1);
    println!("Reduced {} Hosting to 1", plan.name);
    print_cart(&config, &view);

    if updates.has_changed()? {
        let seen = updates.borrow_and_update();
        println!("(cart observers notified: {} line(s))", seen.item_count());
    }

    // Checkout
    println!();
    if let Err(e) = prepare_checkout(&cart, &session) {
        println!("Checkout blocked: {}", ApiError::from(e).message);
    }

    session.register("Jane", "jane@fullstack.rw", "secret1", "secret1")?;
    session.sign_out();
    let customer = session.login("jane@fullstack.rw", "secret1")?;
    println!("Signed in as {}", customer.name);

    let draft = prepare_checkout(&cart, &session)?;
    println!("Checkout {} opened for {}", draft.id, draft.customer_email);

    let order = confirm_order(&cart, draft)?;
    println!(
        "✓ Order {} placed, total {}",
        order.id,
        config.format_currency(order.summary.total)
    );
    println!("Cart now holds {} item(s)", cart.item_count());

    Ok(())
}

fn print_cart(config: &StorefrontConfig, view: &CartView) {
    println!();
    for item in &view.items {
        println!(
            "  {:<24} {:>3} × {:>9}  {:>10}",
            item.name,
            item.quantity,
            config.format_currency(item.price),
            config.format_currency(item.line_total())
        );
    }
    let summary = &view.summary;
    println!("  Subtotal {:>40}", config.format_currency(summary.subtotal));
    println!(
        "  Tax ({}%) {:>39}",
        summary.tax_rate.percentage(),
        config.format_currency(summary.tax)
    );
    println!("  Total {:>43}", config.format_currency(summary.total));
    println!();
}
