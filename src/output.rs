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
use image::codecs::png::PngEncoder;
use image::{ ImageEncoder, RgbaImage };
use std::fs::{ self, OpenOptions };
use std::io::{ BufWriter, Write };
use std::path::{ Path, PathBuf };

use crate::error::ConvertError;

/// `page_001.png` for index 0.
pub fn page_file_name(index: usize) -> String {
    format!("page_{:03}.png", index + 1)
}

// Atomic writer: encode to .part then rename over the target
pub fn write_png_atomic(output_path: &Path, img: &RgbaImage) -> Result<(), ConvertError> {
    let tmp_path = output_path.with_extension("png.part");
    let write_err = |source| ConvertError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    struct TempGuard {
        path: PathBuf,
        keep: bool,
    }
    impl Drop for TempGuard {
        fn drop(&mut self) {
            if !self.keep {
                let _ = fs::remove_file(&self.path);
            }
        }
    }
    let mut guard = TempGuard {
        path: tmp_path.clone(),
        keep: false,
    };

    let f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp_path)
        .map_err(write_err)?;
    let mut writer = BufWriter::new(f);

    let (w, h) = img.dimensions();
    PngEncoder::new(&mut writer)
        .write_image(img.as_raw(), w, h, image::ExtendedColorType::Rgba8)
        .map_err(|source| ConvertError::Encode {
            path: output_path.to_path_buf(),
            source,
        })?;

    writer.flush().map_err(write_err)?;
    writer.get_ref().sync_all().map_err(write_err)?;
    drop(writer);

    fs::rename(&tmp_path, output_path).map_err(write_err)?;
    guard.keep = true;
    Ok(())
}
