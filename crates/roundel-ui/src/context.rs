use std::cell::Cell;
use std::collections::HashMap;

use roundel_mkml::ast::Unit;

use crate::attrs::{AttributeSet, StyledAttributes};
use crate::content::ImageContent;

/// Screen density information used to resolve dimension attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Pixels per `dp`.
    pub density: f32,
    /// Pixels per `sp` (density × user font scale).
    pub scaled_density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self { density: 1.0, scaled_density: 1.0 }
    }
}

impl DisplayMetrics {
    pub fn with_density(density: f32) -> Self {
        Self { density, scaled_density: density }
    }

    /// Converts `value` in `unit` to device pixels.
    #[inline]
    pub fn apply_dimension(&self, value: f32, unit: Unit) -> f32 {
        match unit {
            Unit::Px => value,
            Unit::Dp => value * self.density,
            Unit::Sp => value * self.scaled_density,
        }
    }
}

/// Host environment handed to widgets at construction.
///
/// Holds display metrics, named default styles and named drawable resources.
/// Single-threaded; shared by reference.
#[derive(Debug, Default)]
pub struct Context {
    metrics: DisplayMetrics,
    styles: HashMap<String, AttributeSet>,
    drawables: HashMap<String, ImageContent>,
    open_attributes: Cell<usize>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: DisplayMetrics) -> Self {
        Self { metrics, ..Self::default() }
    }

    #[inline]
    pub fn metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    /// Registers a named default style, selectable at construction.
    pub fn register_style(&mut self, name: impl Into<String>, attrs: AttributeSet) {
        self.styles.insert(name.into(), attrs);
    }

    pub fn style(&self, name: &str) -> Option<&AttributeSet> {
        self.styles.get(name)
    }

    /// Registers a named drawable resource.
    pub fn register_drawable(&mut self, name: impl Into<String>, content: ImageContent) {
        self.drawables.insert(name.into(), content);
    }

    pub fn drawable(&self, name: &str) -> Option<&ImageContent> {
        self.drawables.get(name)
    }

    /// Acquires a styled-attribute handle over `attrs`, falling back to the
    /// style named `def_style`.
    ///
    /// The handle must be released right after reading, via
    /// [`StyledAttributes::recycle`] or by dropping it.
    pub fn obtain_styled_attributes<'a>(
        &'a self,
        attrs: Option<&'a AttributeSet>,
        def_style: Option<&str>,
    ) -> StyledAttributes<'a> {
        let defaults = def_style.and_then(|name| {
            let style = self.styles.get(name);
            if style.is_none() {
                log::warn!("default style {name:?} is not registered; ignoring it");
            }
            style
        });
        self.open_attributes.set(self.open_attributes.get() + 1);
        StyledAttributes::new(self, attrs, defaults)
    }

    /// Number of styled-attribute handles acquired and not yet released.
    #[inline]
    pub fn open_attribute_handles(&self) -> usize {
        self.open_attributes.get()
    }

    pub(crate) fn release_attributes(&self) {
        let open = self.open_attributes.get();
        debug_assert!(open > 0, "styled attributes released twice");
        self.open_attributes.set(open.saturating_sub(1));
    }
}
