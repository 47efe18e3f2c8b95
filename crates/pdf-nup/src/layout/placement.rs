//! Content placement within slots
//!
//! This module computes how a source page is fitted into a slot:
//! - Effective (displayed) size after the page's own rotation
//! - Scaling, either filling the slot or fitting inside it
//! - The final PDF matrix used to draw the page

use crate::types::{Rotation, ScalingMode};

use super::{Rect, SourcePage, Transform};

/// Size of a page as displayed, after its `/Rotate` flag is applied.
pub fn effective_size(page: &SourcePage) -> (f32, f32) {
    let (w, h) = (page.media_box.width, page.media_box.height);
    if page.rotation.swaps_axes() {
        (h, w)
    } else {
        (w, h)
    }
}

/// Calculate the transform that places `page` into `slot`.
///
/// The page is first turned upright, then scaled, then moved so that its
/// lower-left corner sits on the slot's lower-left corner. Under
/// [`ScalingMode::Fit`] the scaled page is centered in the slot instead.
pub fn slot_transform(page: &SourcePage, slot: &Rect, scaling_mode: ScalingMode) -> Transform {
    let (eff_w, eff_h) = effective_size(page);
    let (sx, sy) = calculate_scale(eff_w, eff_h, slot.width, slot.height, scaling_mode);

    let (tx, ty) = match scaling_mode {
        ScalingMode::Fill => (slot.x, slot.y),
        ScalingMode::Fit => (
            slot.x + (slot.width - eff_w * sx) / 2.0,
            slot.y + (slot.height - eff_h * sy) / 2.0,
        ),
    };

    Transform {
        sx,
        sy,
        rotation: page.rotation,
        tx,
        ty,
    }
}

/// Calculate scale factors for fitting source to target dimensions.
fn calculate_scale(
    src_width: f32,
    src_height: f32,
    target_width: f32,
    target_height: f32,
    mode: ScalingMode,
) -> (f32, f32) {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    match mode {
        ScalingMode::Fill => (scale_w, scale_h),
        ScalingMode::Fit => {
            let scale = scale_w.min(scale_h);
            (scale, scale)
        }
    }
}

impl Transform {
    /// The rectangle the page occupies on the sheet
    pub fn placed_rect(&self, page: &SourcePage) -> Rect {
        let (eff_w, eff_h) = effective_size(page);
        Rect::new(self.tx, self.ty, eff_w * self.sx, eff_h * self.sy)
    }

    /// Full PDF matrix `[a b c d e f]` mapping the page's user space onto
    /// the sheet, suitable for a `cm` operator.
    pub fn matrix(&self, page: &SourcePage) -> [f32; 6] {
        let mb = &page.media_box;
        let [ra, rb, rc, rd, re, rf] = upright_matrix(self.rotation, mb.width, mb.height);

        // Fold the origin shift (-x0, -y0) into the rotation's offset
        let re = re - ra * mb.x - rc * mb.y;
        let rf = rf - rb * mb.x - rd * mb.y;

        [
            self.sx * ra,
            self.sy * rb,
            self.sx * rc,
            self.sy * rd,
            self.sx * re + self.tx,
            self.sy * rf + self.ty,
        ]
    }

    /// Apply the matrix to a point in the page's user space
    pub fn apply(&self, page: &SourcePage, (x, y): (f32, f32)) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.matrix(page);
        (a * x + c * y + e, b * x + d * y + f)
    }
}

/// Clockwise rotation of a `w × h` box anchored at the origin, landing
/// back in the positive quadrant.
fn upright_matrix(rotation: Rotation, w: f32, h: f32) -> [f32; 6] {
    match rotation {
        Rotation::None => [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        Rotation::Clockwise90 => [0.0, -1.0, 1.0, 0.0, 0.0, w],
        Rotation::Clockwise180 => [-1.0, 0.0, 0.0, -1.0, w, h],
        Rotation::Clockwise270 => [0.0, 1.0, -1.0, 0.0, h, 0.0],
    }
}
