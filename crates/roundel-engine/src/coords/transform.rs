/// 2D affine transform, row-major:
///
/// ```text
/// | sx  kx  tx |
/// | ky  sy  ty |
/// ```
///
/// A point `p` lands at `(sx*p.x + kx*p.y + tx, ky*p.x + sy*p.y + ty)`.
/// Field order matches `tiny_skia::Transform::from_row`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub sx: f32,
    pub ky: f32,
    pub kx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self { sx: 1.0, ky: 0.0, kx: 0.0, sy: 1.0, tx: 0.0, ty: 0.0 }
    }

    #[inline]
    pub const fn from_scale(sx: f32, sy: f32) -> Self {
        Self { sx, ky: 0.0, kx: 0.0, sy, tx: 0.0, ty: 0.0 }
    }

    #[inline]
    pub const fn from_translate(tx: f32, ty: f32) -> Self {
        Self { sx: 1.0, ky: 0.0, kx: 0.0, sy: 1.0, tx, ty }
    }

    /// Applies `self` first, then `other`.
    #[must_use]
    pub fn then(self, other: Transform) -> Self {
        Self {
            sx: other.sx * self.sx + other.kx * self.ky,
            ky: other.ky * self.sx + other.sy * self.ky,
            kx: other.sx * self.kx + other.kx * self.sy,
            sy: other.ky * self.kx + other.sy * self.sy,
            tx: other.sx * self.tx + other.kx * self.ty + other.tx,
            ty: other.ky * self.tx + other.sy * self.ty + other.ty,
        }
    }

    /// Translation applied after the current transform.
    #[inline]
    #[must_use]
    pub fn post_translate(self, tx: f32, ty: f32) -> Self {
        self.then(Self::from_translate(tx, ty))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        [self.sx, self.ky, self.kx, self.sy, self.tx, self.ty]
            .iter()
            .all(|v| v.is_finite())
    }
}
