//! Integration tests for the DocumentBuilder API
//!
//! These tests run whole documents through parsing, expansion and rendering.

use std::fs;

use proptest::prelude::*;

use trellis::{
    DocumentBuilder, Node, TrellisError,
    catalog::TemplateCatalog,
    config::{AppConfig, ClassConfig, MarkupConfig, OutputConfig, TemplateConfig},
    expand::{ExpandSettings, Expander},
    view::InMemoryViews,
};

fn builder(views: InMemoryViews) -> DocumentBuilder<InMemoryViews> {
    builder_with(AppConfig::default(), views)
}

fn builder_with(config: AppConfig, views: InMemoryViews) -> DocumentBuilder<InMemoryViews> {
    let catalog = TemplateCatalog::from_names(views.names(), config.templates().separator());
    DocumentBuilder::new(config, catalog, views)
}

fn card_views() -> InMemoryViews {
    InMemoryViews::default()
        .with_view("card", r#"<div class="card"><yield/></div>"#)
        .with_view("card-header", "<h1>{{ name }}</h1>")
}

#[test]
fn test_card_with_named_header() {
    let html = builder(card_views())
        .compile(r#"<Card><Header name="Intro"/></Card>"#)
        .expect("Failed to compile");

    assert_eq!(
        html,
        r#"<div class="card"><h1 class="card__intro">Intro</h1></div>"#
    );
}

#[test]
fn test_header_outside_card_passes_through() {
    let html = builder(card_views())
        .compile(r#"<section><Header name="Intro">text</Header></section>"#)
        .expect("Failed to compile");

    assert_eq!(html, r#"<section><Header name="Intro">text</Header></section>"#);
}

#[test]
fn test_most_specific_template_wins() {
    let views = InMemoryViews::default()
        .with_view("card", r#"<div class="card"><yield/></div>"#)
        .with_view("card-header", "<h1><yield/></h1>")
        .with_view("header", "<header>plain</header>")
        .with_view("card-header-title", "<h2>{{ class }}</h2>")
        .with_view("title", "<span>plain</span>");
    let html = builder(views)
        .compile("<Card><Header><Title/></Header></Card>")
        .expect("Failed to compile");

    assert_eq!(
        html,
        concat!(
            r#"<div class="card"><h1 class="card__header">"#,
            r#"<h2 class="header__title">header__title</h2></h1></div>"#
        )
    );
}

#[test]
fn test_two_yields_keep_component() {
    let views = InMemoryViews::default()
        .with_view("card", "<div><yield/><p>between</p><yield/></div>");
    let html = builder(views)
        .compile("<card><b>x</b></card>")
        .expect("Failed to compile");

    assert_eq!(html, "<card><b>x</b></card>");
}

#[test]
fn test_nested_same_tag_classes_dedup() {
    let views = InMemoryViews::default().with_view("box", r#"<div class="{{ class }}"><yield/></div>"#);
    let html = builder(views)
        .compile("<box><box><box>deep</box></box></box>")
        .expect("Failed to compile");

    assert_eq!(
        html,
        r#"<div class="box"><div class="box"><div class="box">deep</div></div></div>"#
    );
}

#[test]
fn test_prefix_sharing_tokens_are_kept() {
    let views = InMemoryViews::default()
        .with_view("box", "<div><yield/></div>")
        .with_view("boxes", "<p>{{ class }}</p>");
    let html = builder(views)
        .compile("<box><boxes/></box>")
        .expect("Failed to compile");

    assert_eq!(
        html,
        r#"<div class="box"><p class="box__boxes">box__boxes</p></div>"#
    );
}

#[test]
fn test_scope_prefixed_inside_longer_token() {
    let views = InMemoryViews::default()
        .with_view("card", "<section scope><yield/></section>")
        .with_view("mycard", "<div><yield/></div>")
        .with_view("item", "<p>{{ class }}</p>");
    let html = builder(views)
        .compile("<card><mycard><item/></mycard></card>")
        .expect("Failed to compile");

    assert_eq!(
        html,
        concat!(
            r#"<section class="card"><div class="card__mycard">"#,
            r#"<p class="card__mycard__item">card__mycard__item</p>"#,
            "</div></section>"
        )
    );
}

#[test]
fn test_scope_applied_once() {
    let views = InMemoryViews::default()
        .with_view("panel", "<section scope><yield/></section>")
        .with_view("item", "<p>{{ class }}</p>");
    let html = builder(views)
        .compile("<panel><item/><item/></panel>")
        .expect("Failed to compile");

    assert_eq!(
        html,
        concat!(
            r#"<section class="panel">"#,
            r#"<p class="panel__item">panel__item</p>"#,
            r#"<p class="panel__item">panel__item</p>"#,
            "</section>"
        )
    );
}

#[test]
fn test_empty_elements_pruned_and_void_kept() {
    let html = builder(InMemoryViews::default())
        .compile("<div><span> </span><br><img src=\"a.png\"/><p><em></em></p>text</div>")
        .expect("Failed to compile");

    assert_eq!(html, r#"<div><br><img src="a.png">text</div>"#);
}

#[test]
fn test_fully_pruned_document_is_empty() {
    let html = builder(InMemoryViews::default())
        .compile("<div>  <span></span>  </div>")
        .expect("Failed to compile");

    assert_eq!(html, "");
}

#[test]
fn test_self_recursive_template_terminates() {
    let config = AppConfig::new(
        TemplateConfig::default(),
        ClassConfig::default().with_max_depth(10),
        MarkupConfig::default(),
        OutputConfig::default(),
    );
    let views = InMemoryViews::default().with_view("echo", "<div><echo>again</echo></div>");
    let html = builder_with(config, views)
        .compile("<echo/>")
        .expect("Failed to compile");

    assert!(html.contains("<echo>again</echo>"));
    assert_eq!(html.matches("<div").count(), 10);
}

#[test]
fn test_parse_errors_are_reported() {
    let builder = builder(card_views());

    let err = builder.compile("<Card><Header></Card>").unwrap_err();
    assert!(matches!(err, TrellisError::Parse { .. }));

    let message = builder.compile_or_message("<a></a><b></b>");
    assert!(!message.is_empty());
    assert!(!message.starts_with('<'));
}

#[test]
fn test_formatted_output() {
    let config = AppConfig::new(
        TemplateConfig::default(),
        ClassConfig::default(),
        MarkupConfig::default(),
        OutputConfig::new(true, true, true),
    );
    let html = builder_with(config, card_views())
        .compile(r#"<Card><Header name="Intro"/></Card>"#)
        .expect("Failed to compile");

    assert_eq!(
        html,
        "<div class=\"card\">\n  <h1 class=\"card__intro\">Intro</h1>\n</div>"
    );
}

#[test]
fn test_templates_from_directory() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("card.view"), r#"<div class="card"><yield/></div>"#).unwrap();
    fs::write(dir.path().join("card-header.view"), "<h1>{{ name }}</h1>").unwrap();
    fs::write(
        dir.path().join("page.view"),
        "<html><head></head><body><main>{{{ yield }}}</main></body></html>",
    )
    .unwrap();

    let config = AppConfig::default().with_template_dir(dir.path());
    let builder = DocumentBuilder::from_config(config).expect("Failed to read templates");
    assert_eq!(builder.catalog().len(), 3);

    let html = builder
        .compile(r#"<Card><Header name="Intro"/></Card>"#)
        .expect("Failed to compile");
    assert_eq!(
        html,
        r#"<div class="card"><h1 class="card__intro">Intro</h1></div>"#
    );

    let html = builder
        .compile("<page><b>hi</b></page>")
        .expect("Failed to compile");
    assert_eq!(html, r#"<body class="page"><main><b>hi</b></main></body>"#);
}

#[test]
fn test_missing_template_directory() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = AppConfig::default().with_template_dir(dir.path().join("missing"));

    let err = DocumentBuilder::from_config(config).err();
    assert!(matches!(err, Some(TrellisError::Catalog { .. })));
}

fn tree_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop::sample::select(vec!["card", "item", "box", "div", "br", "broken"])
        .prop_map(|name| Node::new(name).with_text("x"));

    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop::sample::select(vec!["card", "item", "box", "div", "broken", "span"]),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(name, children)| {
                children
                    .into_iter()
                    .fold(Node::new(name), |node, child| node.with_child(child))
            })
    })
}

proptest! {
    #[test]
    fn prop_expansion_leaves_stacks_balanced(root in tree_strategy()) {
        let config = AppConfig::new(
            TemplateConfig::default(),
            ClassConfig::default().with_max_depth(6),
            MarkupConfig::default(),
            OutputConfig::default(),
        );
        let views = InMemoryViews::default()
            .with_view("card", "<div class=\"card\"><yield/></div>")
            .with_view("card-item", "<li>{{ class }}<yield/></li>")
            .with_view("box", "<section scope><box><yield/></box></section>")
            .with_view("broken", "<p><yield/><yield/></p>");
        let settings = ExpandSettings::from_config(&config);
        let catalog = TemplateCatalog::from_names(views.names(), "-");

        let mut expander = Expander::new(&settings, &catalog, &views);
        let _ = expander.expand(root);

        prop_assert!(expander.breadcrumbs().is_empty());
        prop_assert!(expander.class_stack().is_empty());
    }
}
