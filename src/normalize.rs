/// Maps between a world-space domain `[x, x+w) × [y, y+h)` and the unit square.
///
/// Positions go through `norm_x`/`norm_y` and back through `scale_x`/`scale_y`. Extents
/// (widths and heights) use `norm_w`/`norm_h` and `scale_w`/`scale_h`, which ignore the
/// origin. No validation happens here: a zero extent divides by zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalizer {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Normalizer {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn norm_x(&self, v: f64) -> f64 {
        (v - self.x) / self.w
    }

    #[inline]
    pub fn scale_x(&self, v: f64) -> f64 {
        v * self.w + self.x
    }

    #[inline]
    pub fn norm_y(&self, v: f64) -> f64 {
        (v - self.y) / self.h
    }

    #[inline]
    pub fn scale_y(&self, v: f64) -> f64 {
        v * self.h + self.y
    }

    #[inline]
    pub fn norm_w(&self, v: f64) -> f64 {
        v / self.w
    }

    #[inline]
    pub fn scale_w(&self, v: f64) -> f64 {
        v * self.w
    }

    #[inline]
    pub fn norm_h(&self, v: f64) -> f64 {
        v / self.h
    }

    #[inline]
    pub fn scale_h(&self, v: f64) -> f64 {
        v * self.h
    }
}
