use std::collections::HashMap;

use roundel_mkml::ast::{Node, Unit, Value};

use crate::context::{Context, DisplayMetrics};

/// Declarative attributes for one widget instance, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    values: HashMap<String, Value>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects a markup node's properties. Later duplicates win.
    pub fn from_node(node: &Node) -> Self {
        let values = node.props.iter().map(|p| (p.key.clone(), p.value.clone())).collect();
        Self { values }
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// A scoped read handle over explicit attributes and a default style.
///
/// Obtained from [`Context::obtain_styled_attributes`]. Explicit attributes
/// take precedence over the default style. Releasing happens on
/// [`recycle`](Self::recycle) or drop, whichever comes first.
pub struct StyledAttributes<'a> {
    ctx: &'a Context,
    explicit: Option<&'a AttributeSet>,
    defaults: Option<&'a AttributeSet>,
}

impl<'a> StyledAttributes<'a> {
    pub(crate) fn new(
        ctx: &'a Context,
        explicit: Option<&'a AttributeSet>,
        defaults: Option<&'a AttributeSet>,
    ) -> Self {
        Self { ctx, explicit, defaults }
    }

    pub fn value(&self, key: &str) -> Option<&'a Value> {
        self.explicit
            .and_then(|a| a.get(key))
            .or_else(|| self.defaults.and_then(|a| a.get(key)))
    }

    /// Reads a dimension attribute as whole device pixels.
    ///
    /// Unitless numbers are pixels. A value of the wrong type is logged and
    /// `default` is returned.
    pub fn dimension_pixel_size(&self, key: &str, default: i32) -> i32 {
        match self.value(key) {
            None => default,
            Some(Value::Dimension(v, unit)) => dimension_pixel_size(*v, *unit, &self.ctx.metrics()),
            Some(Value::Number(v)) => dimension_pixel_size(*v, Unit::Px, &self.ctx.metrics()),
            Some(other) => {
                log::warn!(
                    "attribute {key:?} expects a dimension, got {}; using {default}px",
                    other.type_name()
                );
                default
            }
        }
    }

    /// Releases the handle.
    pub fn recycle(self) {}
}

impl Drop for StyledAttributes<'_> {
    fn drop(&mut self) {
        self.ctx.release_attributes();
    }
}

/// Converts a dimension to whole pixels.
///
/// Rounds half away from zero; a non-zero value that would round to 0
/// becomes ±1 so thin dimensions never vanish.
pub fn dimension_pixel_size(value: f32, unit: Unit, metrics: &DisplayMetrics) -> i32 {
    let f = metrics.apply_dimension(value, unit);
    let rounded = (if f >= 0.0 { f + 0.5 } else { f - 0.5 }) as i32;
    if rounded != 0 {
        rounded
    } else if value == 0.0 {
        0
    } else if value > 0.0 {
        1
    } else {
        -1
    }
}
