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
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning PDF pages into PNG files.
///
/// Only `ListDir` aborts a run; the rest are reported against the file or
/// page they belong to and processing moves on.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to list {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to open {}: {reason}", .path.display())]
    Open {
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: io::Error,
    },

    #[error(
        "Skipping {}: output directory {} is already used by {}",
        .path.display(),
        .dir.display(),
        .owner.display()
    )]
    OutputClash {
        path: PathBuf,
        dir: PathBuf,
        owner: PathBuf,
    },

    #[error("Invalid page number '{0}'")]
    InvalidPage(String),

    #[error("Page {page} does not exist (PDF has only {total} pages)")]
    MissingPage {
        page: usize,
        total: usize,
    },

    /// `page` is 1-based, as printed to the user.
    #[error("Failed to render page {page}: {reason}")]
    Render {
        page: usize,
        reason: String,
    },

    #[error("Failed to decode rendered page {page}: {source}")]
    Decode {
        page: usize,
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}
