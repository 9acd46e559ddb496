/*
 *     pagecrop, a command-line tool for turning PDF pages into cropped PNG images
 *     Copyright (C) 2025-2026  Chianti GALLY
 *
 *     This program is free software: you can redistribute it and/or modify
 *     it under the terms of the GNU General Public License as published by
 *     the Free Software Foundation, either version 3 of the License, or
 *     (at your option) any later version.
 *
 *     This program is distributed in the hope that it will be useful,
 *     but WITHOUT ANY WARRANTY; without even the implied warranty of
 *     MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *     GNU General Public License for more details.
 *
 *     You should have received a copy of the GNU General Public License
 *     along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use hayro::{ render, InterpreterSettings, Pdf, RenderSettings };
use image::{ ImageFormat, RgbaImage };
use log::debug;
use std::path::Path;
use std::sync::Arc;

use crate::error::ConvertError;

/// A document whose pages can be rasterised one at a time.
///
/// Resources are released when the value is dropped.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Renders the zero-based page `index` to RGBA pixels.
    fn render_page(&self, index: usize) -> Result<RgbaImage, ConvertError>;
}

/// PDF rendered with hayro.
pub struct HayroDocument {
    pdf: Pdf,
    interpreter_settings: InterpreterSettings,
    render_settings: RenderSettings,
}

impl HayroDocument {
    pub fn open(pdf_path: &Path, scale: f32) -> Result<Self, ConvertError> {
        let file = std::fs::read(pdf_path).map_err(|e| ConvertError::Open {
            path: pdf_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let data = Arc::new(file);
        let pdf = Pdf::new(data).map_err(|e| ConvertError::Open {
            path: pdf_path.to_path_buf(),
            reason: format!("{e:?}"),
        })?;

        let render_settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            ..Default::default()
        };

        Ok(HayroDocument {
            pdf,
            interpreter_settings: InterpreterSettings::default(),
            render_settings,
        })
    }
}

impl PageSource for HayroDocument {
    fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    fn render_page(&self, index: usize) -> Result<RgbaImage, ConvertError> {
        let pages = self.pdf.pages();
        let page = pages.get(index).ok_or_else(|| ConvertError::MissingPage {
            page: index + 1,
            total: pages.len(),
        })?;

        let pixmap = render(page, &self.interpreter_settings, &self.render_settings);
        // hayro cannot encode an empty pixmap
        if pixmap.width() == 0 || pixmap.height() == 0 {
            return Err(ConvertError::Render {
                page: index + 1,
                reason: format!(
                    "page rendered to {}x{} pixels, try a larger --scale",
                    pixmap.width(),
                    pixmap.height()
                ),
            });
        }
        let png = pixmap.take_png();

        let img = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .map_err(|source| ConvertError::Decode { page: index + 1, source })?
            .to_rgba8();
        debug!("rendered page {} at {}x{}", index + 1, img.width(), img.height());
        Ok(img)
    }
}
