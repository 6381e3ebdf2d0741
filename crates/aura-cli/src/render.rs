//! Terminal rendering of the showroom panels.

use std::sync::Arc;

use aura_application::scene_presenter::ProxyEvent;
use aura_application::views::{CartView, InsightView, NavbarView, ProductDetailView, format_price};
use aura_application::{ProductProxy, ProxyVisual, SceneLayout};
use aura_core::{CameraDirective, Product, Vec3};
use colored::Colorize;

fn point(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

pub fn banner() {
    println!("{}", "=== Aura Home Showroom ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands, '/quit' to leave.".bright_black()
    );
    println!();
}

pub fn help() {
    let rows = [
        ("/scene <home|office|studio>", "switch room"),
        ("/list", "show the pieces in this room"),
        ("/select <id>", "inspect a piece"),
        ("/hover [id]", "point at a piece, or away"),
        ("/back", "back to gallery"),
        ("/add", "add the inspected piece to the cart"),
        ("/cart", "open or close the cart"),
        ("/close", "close the cart"),
        ("/inc <id>, /dec <id>", "change a line's quantity"),
        ("/remove <id>", "drop a line from the cart"),
        ("/quit", "leave"),
    ];
    for (usage, what) in rows {
        println!("  {:<30} {}", usage.bright_cyan(), what.bright_black());
    }
}

pub fn navbar(view: &NavbarView) {
    let tabs: Vec<String> = view
        .tabs
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.label).bold().bright_white().to_string()
            } else {
                tab.label.bright_black().to_string()
            }
        })
        .collect();

    let badge = if view.show_badge {
        format!(" cart ({})", view.cart_count).bright_yellow().to_string()
    } else {
        " cart".bright_black().to_string()
    };

    println!("{}  {}{}", "AURA".bold(), tabs.join("  "), badge);
}

pub fn products(products: &[Arc<Product>], layout: Option<&SceneLayout>) {
    for product in products {
        let visual = match layout.and_then(|layout| layout.proxy(&product.id)) {
            Some(proxy) if proxy.model_pending => "loading model",
            Some(proxy) => match &proxy.visual {
                ProxyVisual::External { .. } => "model",
                ProxyVisual::Procedural { .. } => "procedural",
            },
            None => "loading",
        };
        println!(
            "  {:<9} {:<26} {:>9}  {}",
            product.id.bright_cyan(),
            product.name,
            format_price(product.price),
            visual.bright_black()
        );
    }
}

pub fn layout_ready(layout: &SceneLayout) {
    println!(
        "{}",
        format!(
            "{} is ready: {} pieces, {} models loading",
            layout.scene.label(),
            layout.proxies.len(),
            layout.pending_models().len()
        )
        .bright_black()
    );
}

/// One line for a proxy whose model just settled.
pub fn model_resolved(proxy: &ProductProxy) -> String {
    let line = if proxy.uses_external_model() {
        format!("{}: full model loaded", proxy.product.name)
    } else {
        format!("{}: model unavailable, showing the built-in shape", proxy.product.name)
    };
    line.bright_black().to_string()
}

pub fn camera(directive: &CameraDirective) {
    let line = match directive {
        CameraDirective::Focus { product_id, eye, .. } => {
            format!("camera -> {} from {}", product_id, point(*eye))
        }
        CameraDirective::Default { eye, target } => {
            format!("camera -> gallery {} looking at {}", point(*eye), point(*target))
        }
    };
    println!("{}", line.bright_black());
}

pub fn hover(events: &[ProxyEvent]) {
    for event in events {
        match event {
            ProxyEvent::HoverEnter(marker) => println!(
                "{}",
                format!("marker over {} at {}", marker.product_id, point(marker.position))
                    .bright_black()
            ),
            ProxyEvent::HoverExit { product_id } => {
                println!("{}", format!("left {}", product_id).bright_black())
            }
            ProxyEvent::Click(_) => {}
        }
    }
}

pub fn detail(view: &ProductDetailView) {
    let product = &view.product;
    println!();
    println!("{}", product.category.to_uppercase().bright_black());
    println!("{}", product.name.bold());
    println!("{}", format_price(product.price).bright_yellow());
    println!("{}", product.description);
    insight(&view.insight);
    println!(
        "{}",
        "/add to cart  /back to gallery".bright_black()
    );
}

pub fn insight(view: &InsightView) {
    println!("{}", insight_text(view));
}

pub fn insight_text(view: &InsightView) -> String {
    match view {
        InsightView::Loading => "Aura insight: thinking...".bright_black().to_string(),
        InsightView::Text(text) => {
            let mut out = "Aura insight".bright_magenta().to_string();
            for line in text.lines() {
                out.push_str(&format!("\n  {}", line.italic().bright_blue()));
            }
            out
        }
    }
}

pub fn cart(view: &CartView) {
    println!();
    println!("{}", format!("Your cart ({})", view.item_count).bold());
    if view.is_empty() {
        println!("{}", "Your cart is empty.".bright_black());
        return;
    }

    for line in &view.lines {
        let dec = if line.can_decrement { "-" } else { " " };
        println!(
            "  {:<9} {:<26} {:>9} {} x{:<3} + {:>10}",
            line.id.bright_cyan(),
            line.name,
            format_price(line.unit_price),
            dec,
            line.quantity,
            format_price(line.line_total)
        );
        println!("            {}", line.category.bright_black());
    }
    println!(
        "  {:<50} {:>10}",
        "Subtotal".bold(),
        format_price(view.subtotal).bold()
    );
    println!(
        "{}",
        "  Shipping and taxes calculated at checkout.".bright_black()
    );
}

pub fn hint(text: &str) {
    println!("{}", text.bright_black());
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_application::ScenePresenter;
    use aura_core::{ProductType, SceneType};

    #[test]
    fn test_insight_text_keeps_every_line() {
        let text = insight_text(&InsightView::Text("Soft curves.\nWarm light.".to_string()));
        assert!(text.contains("Aura insight"));
        assert!(text.contains("Soft curves."));
        assert!(text.contains("Warm light."));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_model_resolved_names_the_piece() {
        let product = Arc::new(Product {
            id: "p1".to_string(),
            name: "Oak Bench".to_string(),
            category: "Furniture".to_string(),
            price: 100,
            description: String::new(),
            position: Vec3::ZERO,
            scale: None,
            rotation: None,
            color: "#FFFFFF".to_string(),
            product_type: ProductType::Table,
            model_url: None,
        });
        let layout = ScenePresenter::offline().layout(SceneType::Home, &[product]);
        let line = model_resolved(&layout.proxies[0]);
        assert!(line.contains("Oak Bench"));
        assert!(line.contains("built-in shape"));
    }
}
