use std::collections::HashMap;

use roundel_mkml::ast::Node;
use roundel_mkml::{parse_str, DslDocument};

use crate::attrs::AttributeSet;
use crate::context::Context;
use crate::error::UiError;
use crate::widgets::circle_image::CircleImageView;

/// Parses and caches `.mkml` documents, resolving component aliases.
#[derive(Debug, Default)]
pub struct DslLoader {
    registry: HashMap<String, DslDocument>,
}

impl DslLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.mkml` source string into a [`DslDocument`].
    pub fn parse(&self, src: &str) -> Result<DslDocument, UiError> {
        Ok(parse_str(src)?)
    }

    /// Register a parsed document under an alias so other documents can use
    /// it as a widget name.
    pub fn register(&mut self, alias: impl Into<String>, doc: DslDocument) {
        self.registry.insert(alias.into(), doc);
    }

    /// Parse and immediately register a source under `alias`.
    pub fn parse_and_register(&mut self, alias: impl Into<String>, src: &str) -> Result<(), UiError> {
        let doc = self.parse(src)?;
        self.register(alias, doc);
        Ok(())
    }

    /// Build the document's root widget.
    ///
    /// Aliases must already be registered; an unknown name is
    /// [`UiError::UnknownWidget`].
    pub fn build(&self, doc: &DslDocument, ctx: &Context) -> Result<CircleImageView, UiError> {
        self.build_node(&doc.root, ctx, 0)
    }

    fn build_node(&self, node: &Node, ctx: &Context, depth: usize) -> Result<CircleImageView, UiError> {
        match node.widget.as_str() {
            "CircleImageView" => self.build_circle_image(node, ctx),
            alias => match self.registry.get(alias) {
                // Alias cycles would recurse forever.
                Some(component) if depth < MAX_ALIAS_DEPTH => {
                    self.build_node(&component.root, ctx, depth + 1)
                }
                _ => Err(UiError::UnknownWidget(alias.to_string())),
            },
        }
    }

    fn build_circle_image(&self, node: &Node, ctx: &Context) -> Result<CircleImageView, UiError> {
        let attrs = AttributeSet::from_node(node);
        let mut view = CircleImageView::with_style(ctx, Some(&attrs), node.prop_str("style"));
        if let Some(src) = node.prop_str("src") {
            view.set_image_resource(ctx, src)?;
        }
        if !node.children.is_empty() {
            log::warn!("CircleImageView takes no children; ignoring {}", node.children.len());
        }
        Ok(view)
    }
}

const MAX_ALIAS_DEPTH: usize = 16;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roundel_engine::paint::Bitmap;

    use super::*;
    use crate::content::ContentKind;
    use crate::context::DisplayMetrics;

    fn ctx() -> Context {
        let mut ctx = Context::with_metrics(DisplayMetrics::with_density(2.0));
        ctx.register_drawable("avatar", Arc::new(Bitmap::solid(8, 4, [1, 2, 3, 255]).unwrap()).into());
        ctx
    }

    #[test]
    fn builds_circle_image_with_radius_and_src() {
        let ctx = ctx();
        let loader = DslLoader::new();
        let doc = loader.parse("CircleImageView { radius: 5dp  src: avatar }").unwrap();
        let view = loader.build(&doc, &ctx).unwrap();
        assert_eq!(view.border_radius(), 10);
        assert_eq!(view.image().kind(), ContentKind::Raster);
        assert_eq!(ctx.open_attribute_handles(), 0);
    }

    #[test]
    fn style_property_selects_default_style() {
        let mut ctx = ctx();
        let style = parse_str("Style { radius: 20px }").unwrap();
        ctx.register_style("Large", AttributeSet::from_node(&style.root));

        let loader = DslLoader::new();
        let doc = loader.parse("CircleImageView { style: Large }").unwrap();
        assert_eq!(loader.build(&doc, &ctx).unwrap().border_radius(), 20);
    }

    #[test]
    fn registered_alias_expands() {
        let ctx = ctx();
        let mut loader = DslLoader::new();
        loader.parse_and_register("Avatar", "CircleImageView { src: avatar }").unwrap();
        let doc = loader.parse(r#"import "avatar.mkml" as Avatar  Avatar"#).unwrap();
        let view = loader.build(&doc, &ctx).unwrap();
        assert_eq!(view.image().kind(), ContentKind::Raster);
    }

    #[test]
    fn alias_cycle_is_an_error() {
        let mut loader = DslLoader::new();
        loader.parse_and_register("Loop", "Loop").unwrap();
        let doc = loader.parse("Loop").unwrap();
        assert!(matches!(loader.build(&doc, &ctx()), Err(UiError::UnknownWidget(n)) if n == "Loop"));
    }

    #[test]
    fn markup_errors_surface_as_parse_errors() {
        let err = DslLoader::new().parse("CircleImageView { radius: }").unwrap_err();
        let UiError::Parse(parse) = &err else { panic!("expected a parse error, got {err:?}") };
        assert_eq!(parse.line, 1);
        assert!(err.to_string().contains("1:27"), "{err}");
    }

    #[test]
    fn unknown_widget_and_missing_resource() {
        let loader = DslLoader::new();
        let doc = loader.parse("Button { }").unwrap();
        assert!(matches!(loader.build(&doc, &ctx()), Err(UiError::UnknownWidget(n)) if n == "Button"));

        let doc = loader.parse("CircleImageView { src: ghost }").unwrap();
        assert!(matches!(loader.build(&doc, &ctx()), Err(UiError::ResourceNotFound(n)) if n == "ghost"));
    }
}
