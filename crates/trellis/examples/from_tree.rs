//! Example: Expanding a tree built in code
//!
//! This example demonstrates how to build a component tree programmatically
//! and expand it against in-memory templates, without parsing source markup.

use trellis::{DocumentBuilder, Node, catalog::TemplateCatalog, config::AppConfig, view::InMemoryViews};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building component tree...\n");

    // Templates for a small navigation menu
    let views = InMemoryViews::default()
        .with_view("menu", r#"<nav scope><ul><yield/></ul></nav>"#)
        .with_view("menu-item", r#"<li><a href="{{ href }}">{{ label }}</a></li>"#);
    let catalog = TemplateCatalog::from_names(views.names(), "-");

    // <Menu><Item .../><Item .../></Menu>
    let root = Node::new("Menu")
        .with_attribute("class", "main")
        .with_child(
            Node::new("Item")
                .with_attribute("href", "/")
                .with_attribute("label", "Home"),
        )
        .with_child(
            Node::new("Item")
                .with_attribute("href", "/about")
                .with_attribute("label", "About & Contact"),
        );

    println!("Created tree:");
    println!("  Root: {}", root.name());
    println!("  Items: {}", root.elements().count());
    println!();

    let builder = DocumentBuilder::new(AppConfig::default(), catalog, views);

    println!("Expanding...");
    let Some(expanded) = builder.expand(root) else {
        println!("Document was empty after expansion");
        return Ok(());
    };

    let html = builder.render_html(&expanded);
    println!("HTML generated successfully!");
    println!("{html}");

    Ok(())
}
