use std::sync::Arc;

use roundel_engine::coords::{Rect, Transform, Vec2};
use roundel_engine::paint::{Bitmap, ImagePattern};

use crate::attrs::AttributeSet;
use crate::constraints::Constraints;
use crate::content::{ContentKind, ImageContent};
use crate::context::Context;
use crate::error::UiError;
use crate::painter::Painter;
use crate::widget::Widget;

/// Border radius used when the `radius` attribute is not set, in pixels.
pub const DEFAULT_BORDER_RADIUS: i32 = 10;

/// An image view that shows its raster clipped to the circle inscribed in
/// its bounds.
///
/// Measurement always yields a square whose side is the smaller of the
/// resolved width and height. The raster is scaled uniformly so its shorter
/// side covers the square and its longer side is centred (center-crop), then
/// painted as a circle filled with an image pattern.
///
/// The `radius` attribute is parsed and kept (see [`border_radius`]) but
/// does not affect drawing: the shape is always the inscribed circle.
///
/// [`border_radius`]: Self::border_radius
///
/// # Example
/// ```rust,ignore
/// let mut view = CircleImageView::new(&ctx);
/// view.set_image_bitmap(avatar);
/// let draw_list = scene.frame(&mut view, Constraints::loose(Vec2::new(300.0, 200.0)))?;
/// ```
#[derive(Debug)]
pub struct CircleImageView {
    border_radius: i32,
    content: ImageContent,
    /// Side of the measured square, whole pixels.
    min_length: u32,
    radius: f32,
    render: Option<RenderState>,
}

/// Pattern built for one (bitmap, square side) pair.
#[derive(Debug, Clone)]
struct RenderState {
    min_length: u32,
    pattern: ImagePattern,
}

impl CircleImageView {
    pub fn new(ctx: &Context) -> Self {
        Self::with_style(ctx, None, None)
    }

    pub fn with_attrs(ctx: &Context, attrs: &AttributeSet) -> Self {
        Self::with_style(ctx, Some(attrs), None)
    }

    /// Reads `radius` from `attrs`, then from the default style `def_style`,
    /// then falls back to [`DEFAULT_BORDER_RADIUS`].
    pub fn with_style(ctx: &Context, attrs: Option<&AttributeSet>, def_style: Option<&str>) -> Self {
        let styled = ctx.obtain_styled_attributes(attrs, def_style);
        let border_radius = styled.dimension_pixel_size("radius", DEFAULT_BORDER_RADIUS);
        styled.recycle();

        Self {
            border_radius,
            content: ImageContent::Absent,
            min_length: 0,
            radius: 0.0,
            render: None,
        }
    }

    /// Replaces the image content. Render state is rebuilt on the next measure.
    pub fn set_image(&mut self, content: impl Into<ImageContent>) {
        self.content = content.into();
        self.render = None;
    }

    pub fn set_image_bitmap(&mut self, bitmap: Arc<Bitmap>) {
        self.set_image(ImageContent::Raster(bitmap));
    }

    /// Assigns the drawable registered in `ctx` under `name`.
    pub fn set_image_resource(&mut self, ctx: &Context, name: &str) -> Result<(), UiError> {
        let content = ctx
            .drawable(name)
            .cloned()
            .ok_or_else(|| UiError::ResourceNotFound(name.to_string()))?;
        self.set_image(content);
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.set_image(ImageContent::Absent);
    }

    pub fn image(&self) -> &ImageContent {
        &self.content
    }

    /// Configured border radius in pixels. Has no effect on drawing.
    pub fn border_radius(&self) -> i32 {
        self.border_radius
    }

    /// Side of the square from the last measure.
    pub fn min_length(&self) -> u32 {
        self.min_length
    }

    /// Radius of the drawn circle, `min_length / 2`.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn measured_size(&self) -> Vec2 {
        Vec2::splat(self.min_length as f32)
    }

    /// Image pattern built by the last successful measure, if any.
    pub fn pattern(&self) -> Option<&ImagePattern> {
        self.render.as_ref().map(|r| &r.pattern)
    }

    fn rebuild_render_state(&mut self) -> Result<(), UiError> {
        let bitmap = match &self.content {
            ImageContent::Absent => {
                self.render = None;
                return Ok(());
            }
            ImageContent::Raster(bitmap) => bitmap,
            ImageContent::Vector(_) => {
                self.render = None;
                return Err(UiError::UnsupportedContentKind { kind: ContentKind::Vector });
            }
        };

        if self.min_length == 0 {
            log::trace!("circle image: zero-sized square, nothing to paint");
            self.render = None;
            return Ok(());
        }

        if let Some(state) = &self.render {
            if state.min_length == self.min_length && Arc::ptr_eq(&state.pattern.bitmap, bitmap) {
                log::trace!("circle image: reusing pattern for side {}", self.min_length);
                return Ok(());
            }
        }

        let transform = center_crop_transform(bitmap.size(), self.min_length as f32);
        log::debug!(
            "circle image: {}x{} into side {} (scale {})",
            bitmap.width(),
            bitmap.height(),
            self.min_length,
            transform.sx
        );
        self.render = Some(RenderState {
            min_length: self.min_length,
            pattern: ImagePattern::new(Arc::clone(bitmap), transform),
        });
        Ok(())
    }
}

impl Widget for CircleImageView {
    /// Resolves the content's intrinsic size against `constraints`, squares
    /// it to the smaller side and rebuilds the image pattern.
    ///
    /// The square size is recorded even when the rebuild fails with
    /// [`UiError::UnsupportedContentKind`].
    fn measure(&mut self, constraints: Constraints) -> Result<Vec2, UiError> {
        let resolved = constraints.constrain(self.content.intrinsic_size());
        self.min_length = whole_pixels(resolved.min_element());
        self.radius = self.min_length as f32 / 2.0;

        self.rebuild_render_state()?;
        Ok(self.measured_size())
    }

    /// Paints one circle filled with the image pattern, or nothing when no
    /// pattern has been built.
    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let Some(state) = &self.render else { return };
        let center = rect.origin + Vec2::splat(self.radius);
        painter.fill_circle(center, self.radius, state.pattern.translated(rect.origin));
    }
}

/// Uniform scale + translate mapping an image of `image_size` onto a square
/// of side `side`, center-cropping the longer dimension.
pub fn center_crop_transform(image_size: Vec2, side: f32) -> Transform {
    let (w, h) = (image_size.x, image_size.y);
    let radius = side / 2.0;
    if w > h {
        let scale = side / h;
        Transform::from_scale(scale, scale).post_translate(-(w * scale / 2.0 - radius), 0.0)
    } else {
        let scale = side / w;
        Transform::from_scale(scale, scale).post_translate(0.0, -(h * scale / 2.0 - radius))
    }
}

/// Truncates a resolved length to whole pixels; non-finite or negative → 0.
fn whole_pixels(v: f32) -> u32 {
    if v.is_finite() && v > 0.0 { v.floor() as u32 } else { 0 }
}

#[cfg(test)]
mod tests {
    use roundel_engine::raster::Canvas;
    use roundel_engine::scene::{DrawCmd, DrawList};
    use roundel_mkml::ast::{Unit, Value};

    use super::*;
    use crate::content::VectorImage;
    use crate::context::DisplayMetrics;
    use crate::scene::UiScene;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn solid(w: u32, h: u32) -> Arc<Bitmap> {
        Arc::new(Bitmap::solid(w, h, GREEN).unwrap())
    }

    /// Three bands along the longer axis: red, green, blue.
    fn banded(w: u32, h: u32) -> Arc<Bitmap> {
        let mut rgba = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                let t = if w > h { x * 3 / w } else { y * 3 / h };
                rgba.extend_from_slice([&RED, &GREEN, &BLUE][t as usize]);
            }
        }
        Arc::new(Bitmap::from_rgba8(w, h, rgba).unwrap())
    }

    fn view_with(bitmap: Arc<Bitmap>) -> CircleImageView {
        let mut view = CircleImageView::new(&Context::new());
        view.set_image_bitmap(bitmap);
        view
    }

    fn render(view: &mut CircleImageView, constraints: Constraints) -> Canvas {
        let mut scene = UiScene::new();
        let list = scene.frame(view, constraints).unwrap();
        let side = view.min_length().max(1);
        let mut canvas = Canvas::new(side, side).unwrap();
        canvas.draw(list);
        canvas
    }

    #[test]
    fn default_border_radius_is_ten() {
        let ctx = Context::new();
        assert_eq!(CircleImageView::new(&ctx).border_radius(), DEFAULT_BORDER_RADIUS);
        assert_eq!(ctx.open_attribute_handles(), 0);
    }

    #[test]
    fn border_radius_resolves_density() {
        let ctx = Context::with_metrics(DisplayMetrics::with_density(2.0));
        let attrs = AttributeSet::new().with("radius", Value::Dimension(6.0, Unit::Dp));
        let view = CircleImageView::with_attrs(&ctx, &attrs);
        assert_eq!(view.border_radius(), 12);
        assert_eq!(ctx.open_attribute_handles(), 0);
    }

    #[test]
    fn border_radius_from_default_style() {
        let mut ctx = Context::new();
        ctx.register_style("Avatar", AttributeSet::new().with("radius", Value::Number(24.0)));
        let view = CircleImageView::with_style(&ctx, None, Some("Avatar"));
        assert_eq!(view.border_radius(), 24);
        assert_eq!(ctx.open_attribute_handles(), 0);
    }

    #[test]
    fn measure_is_square_of_smaller_side() {
        let mut view = view_with(solid(50, 50));
        let cases = [
            (Constraints::tight(Vec2::new(120.0, 80.0)), 80),
            (Constraints::tight(Vec2::new(64.0, 200.0)), 64),
            (Constraints::loose(Vec2::new(30.0, 100.0)), 30),
            (Constraints::unbounded(), 50),
        ];
        for (constraints, side) in cases {
            let size = view.measure(constraints).unwrap();
            assert_eq!(size, Vec2::splat(side as f32), "{constraints:?}");
            assert_eq!(view.radius(), side as f32 / 2.0);
        }
    }

    #[test]
    fn measure_uses_intrinsic_size_when_unconstrained() {
        let mut view = view_with(solid(300, 120));
        assert_eq!(view.measure(Constraints::unbounded()).unwrap(), Vec2::splat(120.0));
    }

    #[test]
    fn fractional_constraints_floor_to_pixels() {
        let mut view = view_with(solid(10, 10));
        assert_eq!(view.measure(Constraints::tight(Vec2::new(41.7, 99.0))).unwrap(), Vec2::splat(41.0));
        assert_eq!(view.radius(), 20.5);
    }

    #[test]
    fn empty_view_measures_to_zero_without_pattern() {
        let mut view = CircleImageView::new(&Context::new());
        assert_eq!(view.measure(Constraints::unbounded()).unwrap(), Vec2::zero());
        assert!(view.pattern().is_none());
        assert_eq!(view.measure(Constraints::tight(Vec2::new(40.0, 60.0))).unwrap(), Vec2::splat(40.0));
        assert!(view.pattern().is_none());
    }

    #[test]
    fn landscape_scales_by_height_and_centres_horizontally() {
        let mut view = view_with(solid(200, 100));
        view.measure(Constraints::tight(Vec2::new(50.0, 50.0))).unwrap();
        let t = view.pattern().unwrap().transform;
        assert_eq!((t.sx, t.sy), (0.5, 0.5));
        // 200 * 0.5 = 100 wide; centred on a 50 square → shift left by 25
        assert_eq!((t.tx, t.ty), (-25.0, 0.0));
    }

    #[test]
    fn portrait_scales_by_width_and_centres_vertically() {
        let mut view = view_with(solid(40, 120));
        view.measure(Constraints::tight(Vec2::new(80.0, 80.0))).unwrap();
        let t = view.pattern().unwrap().transform;
        assert_eq!((t.sx, t.sy), (2.0, 2.0));
        assert_eq!((t.tx, t.ty), (0.0, -80.0));
    }

    #[test]
    fn square_image_has_no_offset() {
        let mut view = view_with(solid(64, 64));
        view.measure(Constraints::tight(Vec2::new(32.0, 90.0))).unwrap();
        let t = view.pattern().unwrap().transform;
        assert_eq!((t.sx, t.sy, t.tx, t.ty), (0.5, 0.5, 0.0, 0.0));
    }

    #[test]
    fn pattern_clamps_and_smooths() {
        let mut view = view_with(solid(8, 8));
        view.measure(Constraints::unbounded()).unwrap();
        let p = view.pattern().unwrap();
        assert!(p.anti_alias && p.dither);
    }

    #[test]
    fn vector_content_is_unsupported() {
        let mut view = CircleImageView::new(&Context::new());
        view.set_image(ImageContent::Vector(VectorImage { size: Vec2::new(24.0, 24.0) }));
        let err = view.measure(Constraints::tight(Vec2::new(48.0, 30.0))).unwrap_err();
        assert!(matches!(err, UiError::UnsupportedContentKind { kind: ContentKind::Vector }));
        // the square is still recorded
        assert_eq!(view.measured_size(), Vec2::splat(30.0));
        assert!(view.pattern().is_none());
    }

    #[test]
    fn zero_side_builds_no_pattern_and_paints_nothing() {
        let mut view = view_with(solid(30, 10));
        let mut scene = UiScene::new();
        let list = scene.frame(&mut view, Constraints::tight(Vec2::new(0.0, 50.0))).unwrap();
        assert!(list.is_empty());
        assert!(view.pattern().is_none());
        assert_eq!(view.measured_size(), Vec2::zero());

        view.measure(Constraints::tight(Vec2::new(10.0, 50.0))).unwrap();
        assert!(view.pattern().is_some());
    }

    #[test]
    fn pattern_is_reused_for_same_bitmap_and_side() {
        let mut view = view_with(solid(10, 20));
        view.measure(Constraints::tight(Vec2::new(30.0, 30.0))).unwrap();
        let first = view.pattern().unwrap().clone();
        view.measure(Constraints::tight(Vec2::new(30.0, 45.0))).unwrap();
        assert_eq!(view.pattern().unwrap(), &first);

        view.measure(Constraints::tight(Vec2::new(20.0, 20.0))).unwrap();
        assert_ne!(view.pattern().unwrap().transform, first.transform);
    }

    #[test]
    fn changing_image_drops_pattern_until_measured() {
        let mut view = view_with(solid(10, 10));
        view.measure(Constraints::unbounded()).unwrap();
        view.set_image_bitmap(solid(20, 10));
        assert!(view.pattern().is_none());
        view.measure(Constraints::unbounded()).unwrap();
        assert_eq!(view.pattern().unwrap().bitmap.width(), 20);
    }

    #[test]
    fn image_resource_lookup() {
        let mut ctx = Context::new();
        ctx.register_drawable("avatar", solid(4, 4).into());
        let mut view = CircleImageView::new(&ctx);
        view.set_image_resource(&ctx, "avatar").unwrap();
        assert_eq!(view.image().kind(), ContentKind::Raster);

        let err = view.set_image_resource(&ctx, "nope").unwrap_err();
        assert!(matches!(err, UiError::ResourceNotFound(ref n) if n == "nope"));
    }

    #[test]
    fn paints_one_circle_inscribed_in_the_square() {
        let mut view = view_with(solid(30, 30));
        let mut scene = UiScene::new();
        let list = scene.frame(&mut view, Constraints::tight(Vec2::new(60.0, 40.0))).unwrap();
        let [DrawCmd::Circle { center, radius, .. }] = list else {
            panic!("expected exactly one circle, got {list:?}");
        };
        assert_eq!(*center, Vec2::new(20.0, 20.0));
        assert_eq!(*radius, 20.0);
    }

    #[test]
    fn no_image_paints_nothing() {
        let mut view = CircleImageView::new(&Context::new());
        let mut scene = UiScene::new();
        let list = scene.frame(&mut view, Constraints::tight(Vec2::new(20.0, 20.0))).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn paint_offsets_circle_and_pattern_by_origin() {
        let mut view = view_with(solid(10, 10));
        view.measure(Constraints::tight(Vec2::new(10.0, 10.0))).unwrap();
        let mut list = DrawList::new();
        let rect = Rect::from_origin_size(Vec2::new(100.0, 50.0), Vec2::splat(10.0));
        view.paint(&mut Painter::new(&mut list), rect);
        let [DrawCmd::Circle { center, fill, .. }] = list.as_slice() else {
            panic!("expected exactly one circle, got {list:?}");
        };
        assert_eq!(*center, Vec2::new(105.0, 55.0));
        assert_eq!((fill.transform.tx, fill.transform.ty), (100.0, 50.0));
    }

    #[test]
    fn landscape_render_shows_only_the_middle_band() {
        let mut view = view_with(banded(30, 10));
        let canvas = render(&mut view, Constraints::tight(Vec2::new(10.0, 10.0)));
        assert_eq!(canvas.pixel(5, 5), Some(GREEN));
        assert_eq!(canvas.pixel(1, 5), Some(GREEN));
        assert_eq!(canvas.pixel(8, 5), Some(GREEN));
        assert_eq!(canvas.pixel(0, 0), Some(CLEAR));
    }

    #[test]
    fn portrait_render_shows_only_the_middle_band() {
        let mut view = view_with(banded(20, 60));
        let canvas = render(&mut view, Constraints::tight(Vec2::new(20.0, 20.0)));
        assert_eq!(canvas.pixel(10, 10), Some(GREEN));
        assert_eq!(canvas.pixel(10, 2), Some(GREEN));
        assert_eq!(canvas.pixel(10, 17), Some(GREEN));
        assert_eq!(canvas.pixel(19, 19), Some(CLEAR));
    }

    #[test]
    fn border_radius_never_changes_the_shape() {
        let render_with = |radius: f32| {
            let attrs = AttributeSet::new().with("radius", Value::Number(radius));
            let mut view = CircleImageView::with_attrs(&Context::new(), &attrs);
            view.set_image_bitmap(banded(30, 10));
            let canvas = render(&mut view, Constraints::tight(Vec2::new(24.0, 24.0)));
            canvas.encode_png().unwrap()
        };
        assert_eq!(render_with(0.0), render_with(10.0));
        assert_eq!(render_with(10.0), render_with(64.0));
    }
}
