use roundel_engine::coords::Vec2;
use roundel_engine::paint::ImagePattern;
use roundel_engine::scene::{DrawCmd, DrawList};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Appends to the frame's draw list; later calls paint on top.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self { draw_list }
    }

    /// Disc around `center` filled with an image pattern.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, fill: ImagePattern) {
        self.draw_list.push(DrawCmd::Circle { center, radius, fill });
    }
}
