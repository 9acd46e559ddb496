/*
 * Copyright (C) 2025  Chianti GALLY
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
//! Center-crop geometry: the largest centered sub-rectangle of a page that
//! matches a target aspect ratio.

use std::fmt;
use std::str::FromStr;

/// Width divided by height. Always finite and strictly positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    pub const FOUR_BY_THREE: AspectRatio = AspectRatio(4.0 / 3.0);

    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(AspectRatio(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::FOUR_BY_THREE
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Accepts `W:H` (e.g. `4:3`, `16:9`) or a plain decimal (`1.3333`).
impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s.split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| format!("invalid width in ratio '{s}'"))?;
                let h: f64 = h.trim().parse().map_err(|_| format!("invalid height in ratio '{s}'"))?;
                if h == 0.0 {
                    return Err(format!("ratio '{s}' has a zero height"));
                }
                w / h
            }
            None => s.trim().parse().map_err(|_| format!("invalid ratio '{s}'"))?,
        };
        AspectRatio::new(value).ok_or_else(|| format!("ratio '{s}' must be positive"))
    }
}

/// Pixel bounds of a crop, `x1`/`y1` exclusive.
///
/// Invariant: `0 <= x0 < x1 <= width` and `0 <= y0 < y1 <= height` of the
/// image it was computed for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {}) {}x{}", self.x0, self.y0, self.x1, self.y1, self.width(), self.height())
    }
}

/// Size of the largest sub-rectangle of `width x height` with the given ratio.
///
/// Wider-than-target sources keep their height and lose width; everything
/// else keeps its width and loses height. The cut side is rounded to the
/// neighbouring integer that lands closer to `ratio`, so the crop is never
/// further from the target than the source was.
pub fn crop_dimensions(width: u32, height: u32, ratio: AspectRatio) -> (u32, u32) {
    let width = width.max(1);
    let height = height.max(1);
    let r = ratio.value();

    if (width as f64) / (height as f64) > r {
        let target_width = nearest_side((height as f64) * r, width, |w| (w as f64) / (height as f64), r);
        (target_width, height)
    } else {
        let target_height = nearest_side((width as f64) / r, height, |h| (width as f64) / (h as f64), r);
        (width, target_height)
    }
}

fn nearest_side(exact: f64, limit: u32, ratio_of: impl Fn(u32) -> f64, target: f64) -> u32 {
    let lo = (exact.floor() as u32).clamp(1, limit);
    let hi = (exact.ceil() as u32).clamp(1, limit);
    let err_lo = (ratio_of(lo) - target).abs();
    let err_hi = (ratio_of(hi) - target).abs();

    if err_hi < err_lo {
        hi
    } else if err_lo < err_hi {
        lo
    } else {
        (exact.round() as u32).clamp(1, limit)
    }
}

/// Centers the crop from [`crop_dimensions`] inside the source bounds.
pub fn crop_rect(width: u32, height: u32, ratio: AspectRatio) -> CropRect {
    let (target_width, target_height) = crop_dimensions(width, height, ratio);

    let x0 = width.saturating_sub(target_width) / 2;
    let y0 = height.saturating_sub(target_height) / 2;

    // Rounding can push the far edge one pixel past the source.
    let x1 = (x0 + target_width).min(width.max(1));
    let y1 = (y0 + target_height).min(height.max(1));

    CropRect { x0, y0, x1, y1 }
}
