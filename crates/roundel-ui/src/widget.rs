use roundel_engine::coords::{Rect, Vec2};

use crate::constraints::Constraints;
use crate::error::UiError;
use crate::painter::Painter;

/// The core trait every UI component implements.
///
/// The host drives each widget with one `measure` followed by any number of
/// `paint` calls, all on the same thread.
///
/// ```rust,ignore
/// pub struct Dot { fill: ImagePattern, size: f32 }
///
/// impl Widget for Dot {
///     fn measure(&mut self, constraints: Constraints) -> Result<Vec2, UiError> {
///         Ok(constraints.constrain(Vec2::splat(self.size)))
///     }
///     fn paint(&self, painter: &mut Painter, rect: Rect) {
///         let r = self.size / 2.0;
///         painter.fill_circle(rect.origin + Vec2::splat(r), r, self.fill.translated(rect.origin));
///     }
/// }
/// ```
pub trait Widget: 'static {
    /// Compute the size this widget takes within `constraints`.
    ///
    /// Widgets may rebuild derived state here. An `Err` aborts the current
    /// layout pass; the widget must still be safe to measure again.
    fn measure(&mut self, constraints: Constraints) -> Result<Vec2, UiError>;

    /// Draw this widget into `painter` within `rect`.
    ///
    /// `rect` is the space allocated by the parent, normally the measured size.
    fn paint(&self, painter: &mut Painter, rect: Rect);
}
