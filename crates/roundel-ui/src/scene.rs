use roundel_engine::coords::{Rect, Vec2};
use roundel_engine::scene::{DrawCmd, DrawList};

use crate::constraints::Constraints;
use crate::error::UiError;
use crate::painter::Painter;
use crate::widget::Widget;

/// Runs layout + paint passes and owns the resulting draw list.
///
/// ```rust,ignore
/// let mut scene = UiScene::new();
/// let draw_list = scene.frame(&mut view, Constraints::tight(Vec2::new(96.0, 96.0)))?;
/// canvas.draw(draw_list);
/// ```
#[derive(Debug, Default)]
pub struct UiScene {
    /// Draw list populated by the most recent [`frame`](Self::frame) call.
    pub draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures `root` under `constraints`, then paints it at the origin with
    /// its measured size.
    ///
    /// A measure error is returned before anything is painted; the draw list
    /// is left empty in that case.
    pub fn frame<W: Widget>(
        &mut self,
        root: &mut W,
        constraints: Constraints,
    ) -> Result<&[DrawCmd], UiError> {
        self.draw_list.clear();

        let size = root.measure(constraints)?;
        let rect = Rect::from_origin_size(Vec2::zero(), size);
        log::trace!("frame: measured {}x{}", size.x, size.y);

        let mut painter = Painter::new(&mut self.draw_list);
        root.paint(&mut painter, rect);

        Ok(self.draw_list.as_slice())
    }
}
