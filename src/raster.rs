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
use image::imageops::{ self, FilterType };
use image::{ GenericImageView, Rgba, RgbaImage, SubImage };

use crate::geometry::{ crop_rect, AspectRatio, CropRect };

/// Read-only view of `rect` inside `img`. No pixels are copied.
pub fn crop(img: &RgbaImage, rect: CropRect) -> SubImage<&RgbaImage> {
    imageops::crop_imm(img, rect.x0, rect.y0, rect.width(), rect.height())
}

/// Resamples any readable RGBA region to exactly `width x height`.
pub fn resize<I>(img: &I, width: u32, height: u32, filter: FilterType) -> RgbaImage
    where I: GenericImageView<Pixel = Rgba<u8>>
{
    imageops::resize(img, width.max(1), height.max(1), filter)
}

/// Center-crops `img` to `ratio`, then resizes to `target` when one is given.
pub fn fit(
    img: &RgbaImage,
    ratio: AspectRatio,
    target: Option<(u32, u32)>,
    filter: FilterType
) -> (CropRect, RgbaImage) {
    let rect = crop_rect(img.width(), img.height(), ratio);
    let view = crop(img, rect);

    let out = match target {
        Some((width, height)) => resize(&*view, width, height, filter),
        None => view.to_image(),
    };
    (rect, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    /// Left half red, right half blue, with a one-pixel green frame.
    fn test_page(width: u32, height: u32) -> RgbaImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                Rgba([0, 255, 0, 255])
            } else if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn crop_copies_pixels_verbatim() {
        let img = test_page(16, 9);
        let rect = crop_rect(16, 9, AspectRatio::FOUR_BY_THREE);
        assert_eq!(rect, CropRect { x0: 2, y0: 0, x1: 14, y1: 9 });

        let view = crop(&img, rect);
        assert_eq!(view.dimensions(), (12, 9));
        for (x, y, px) in view.to_image().enumerate_pixels() {
            assert_eq!(*px, *img.get_pixel(x + 2, y));
        }
    }

    #[test]
    fn resize_hits_exact_size() {
        let img = test_page(37, 11);
        for filter in [FilterType::Nearest, FilterType::Triangle, FilterType::CatmullRom, FilterType::Lanczos3] {
            let out = resize(&img, 1440, 1080, filter);
            assert_eq!(out.dimensions(), (1440, 1080));
        }
    }

    #[test]
    fn resize_single_pixel() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        let out = resize(&img, 64, 48, FilterType::Nearest);
        assert_eq!(out.dimensions(), (64, 48));
        assert_eq!(*out.get_pixel(63, 47), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn fit_without_resize_keeps_crop_resolution() {
        let img = test_page(1000, 750);
        let (rect, out) = fit(&img, AspectRatio::FOUR_BY_THREE, None, FilterType::CatmullRom);
        assert_eq!((rect.width(), rect.height()), (1000, 750));
        assert_eq!(out, img);
    }

    #[test]
    fn fit_wide_page_to_fixed_size() {
        let img = test_page(1600, 900);
        let (rect, out) = fit(&img, AspectRatio::FOUR_BY_THREE, Some((1440, 1080)), FilterType::Triangle);
        assert_eq!(rect, CropRect { x0: 200, y0: 0, x1: 1400, y1: 900 });
        assert_eq!(out.dimensions(), (1440, 1080));
        // The frame's left and right columns were cut away.
        assert_eq!(*out.get_pixel(0, 540), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(1439, 540), Rgba([0, 0, 255, 255]));
    }
}
