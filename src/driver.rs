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
//! Walks a directory of PDFs and converts the selected pages of each one.

use colored::Colorize;
use image::imageops::FilterType;
use indicatif::{ ProgressBar, ProgressStyle };
use log::{ debug, error, info, warn };
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{ Path, PathBuf };

use crate::error::ConvertError;
use crate::geometry::AspectRatio;
use crate::output::{ page_file_name, write_png_atomic };
use crate::pages::PageSelection;
use crate::pdf::{ HayroDocument, PageSource };
use crate::raster::fit;

/// Everything a conversion needs, passed down explicitly.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub ratio: AspectRatio,
    /// `None` keeps the crop at its rendered resolution.
    pub target: Option<(u32, u32)>,
    pub filter: FilterType,
    pub render_scale: f32,
    pub show_progress: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            ratio: AspectRatio::FOUR_BY_THREE,
            target: Some((1440, 1080)),
            filter: FilterType::CatmullRom,
            render_scale: 2.0,
            show_progress: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub files_failed: usize,
    pub pages_written: usize,
    pub pages_failed: usize,
}

impl Summary {
    fn absorb(&mut self, other: &Summary) {
        self.files += other.files;
        self.files_failed += other.files_failed;
        self.pages_written += other.pages_written;
        self.pages_failed += other.pages_failed;
    }
}

/// Non-recursive, case-insensitive `*.pdf` listing, sorted by name.
pub fn find_pdfs(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let entries = fs::read_dir(dir).map_err(|source| ConvertError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Converts every PDF in `input_dir`, writing one directory per PDF under
/// `output_root`. Only a failure to list `input_dir` is returned as an error.
pub fn run(
    input_dir: &Path,
    output_root: &Path,
    selection: PageSelection,
    options: &ConvertOptions
) -> Result<Summary, ConvertError> {
    let files = find_pdfs(input_dir)?;
    let mut summary = Summary::default();

    if files.is_empty() {
        println!("{}", format!("No PDF files found in {}", input_dir.display()).yellow());
        return Ok(summary);
    }

    println!("{}", format!("Queued {} PDF file(s)", files.len()).blue());

    // output directory -> PDF that owns it
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

    for file in &files {
        summary.files += 1;
        let output_dir = output_dir_for(file, output_root);
        let result = match claimed.get(&output_dir) {
            Some(owner) =>
                Err(ConvertError::OutputClash {
                    path: file.clone(),
                    dir: output_dir,
                    owner: owner.clone(),
                }),
            None => {
                claimed.insert(output_dir, file.clone());
                convert_file(file, output_root, selection, options)
            }
        };
        match result {
            Ok(file_summary) => summary.absorb(&file_summary),
            Err(e) => {
                summary.files_failed += 1;
                error!("{}: {}", file.display(), e);
                eprintln!("{}", format!("Error processing {}: {}", file.display(), e).red());
            }
        }
    }

    Ok(summary)
}

/// `<output_root>/<file stem>`, keeping non-UTF-8 stems intact.
pub fn output_dir_for(pdf_path: &Path, output_root: &Path) -> PathBuf {
    output_root.join(pdf_path.file_stem().unwrap_or(OsStr::new("output")))
}

/// Opens one PDF with hayro and converts its selected pages.
pub fn convert_file(
    pdf_path: &Path,
    output_root: &Path,
    selection: PageSelection,
    options: &ConvertOptions
) -> Result<Summary, ConvertError> {
    let doc = HayroDocument::open(pdf_path, options.render_scale)?;

    let output_dir = output_dir_for(pdf_path, output_root);
    fs::create_dir_all(&output_dir).map_err(|source| ConvertError::CreateDir {
        path: output_dir.clone(),
        source,
    })?;

    let name = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf_path.display().to_string());

    Ok(convert_document(&doc, &name, &output_dir, selection, options))
}

/// Converts the selected pages of an already opened document into
/// `output_dir`. Page failures are reported and counted, never returned.
pub fn convert_document<D: PageSource>(
    doc: &D,
    name: &str,
    output_dir: &Path,
    selection: PageSelection,
    options: &ConvertOptions
) -> Summary {
    let mut summary = Summary::default();
    let total = doc.page_count();

    if let Some(missing) = selection.missing_in(total) {
        warn!("{name}: {missing}");
        eprintln!("{}", format!("{name}: {missing}").yellow());
        return summary;
    }

    let pages = selection.indices(total);
    if pages.is_empty() {
        return summary;
    }

    println!("{}", format!("Converting {} ({} pages)", name, pages.len()).blue());

    let pb = if options.show_progress {
        ProgressBar::new(pages.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    for index in pages {
        pb.set_message(page_file_name(index));
        match convert_page(doc, index, output_dir, options) {
            Ok(path) => {
                summary.pages_written += 1;
                info!("OK: {}", path.display());
            }
            Err(e) => {
                summary.pages_failed += 1;
                error!("{name}: {e}");
                pb.suspend(|| {
                    eprintln!("{}", format!("Error converting {} page {}: {}", name, index + 1, e).red());
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("{}", format!("{name} done").green()));
    summary
}

/// Render, crop, resize and write a single zero-based page.
pub fn convert_page<D: PageSource>(
    doc: &D,
    index: usize,
    output_dir: &Path,
    options: &ConvertOptions
) -> Result<PathBuf, ConvertError> {
    let img = doc.render_page(index)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(ConvertError::Render {
            page: index + 1,
            reason: "rendered page has no pixels".into(),
        });
    }

    let (rect, out) = fit(&img, options.ratio, options.target, options.filter);
    debug!(
        "page {}: {}x{} -> crop {} -> {}x{}",
        index + 1,
        img.width(),
        img.height(),
        rect,
        out.width(),
        out.height()
    );

    let output_path = output_dir.join(page_file_name(index));
    write_png_atomic(&output_path, &out)?;
    Ok(output_path)
}
