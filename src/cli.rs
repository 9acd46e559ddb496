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
use clap::{ Parser, ValueEnum };
use colored::Colorize;
use image::imageops::FilterType;
use std::path::PathBuf;

use crate::driver::ConvertOptions;
use crate::geometry::AspectRatio;
use crate::pages::{ parse_page_arg, PageSelection };

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    Nearest,
    /// Bilinear
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

const LONG_ABOUT: &str =
    "\
Converts every PDF in a directory into PNG images, one per page.
Each page is rendered, center-cropped to a fixed aspect ratio (4:3 by default) and resized
to a fixed resolution (1440x1080 by default). Output goes to a directory named after the PDF,
as page_001.png, page_002.png, ...


Copyright (C) 2025 Chianti GALLY

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Converts PDF pages into center-cropped, fixed-size PNG images.",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    /// Only convert this page (1-based). Converts all pages when omitted or invalid
    #[arg(allow_negative_numbers = true)]
    pub page: Option<String>,

    /// Directory scanned for PDF files (not recursive)
    #[arg(short = 'i', long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub input_dir: PathBuf,

    /// Where the per-PDF output directories are created. Defaults to the input directory
    #[arg(short = 'o', long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Output width in pixels
    #[arg(short = 'W', long, default_value_t = 1440, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Output height in pixels
    #[arg(short = 'H', long, default_value_t = 1080, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Crop aspect ratio, as W:H or a decimal
    #[arg(short = 'r', long, default_value = "4:3")]
    pub ratio: AspectRatio,

    /// Keep the cropped page at its rendered resolution
    #[arg(long, action)]
    pub no_resize: bool,

    /// Resampling filter used when resizing
    #[arg(short = 'f', long, default_value_t = Filter::CatmullRom, value_enum)]
    pub filter: Filter,

    /// PDF render scale (1.0 = 72 dpi)
    #[arg(short = 's', long, default_value_t = 2.0, value_parser = parse_scale)]
    pub scale: f32,

    /// Hide progress bars
    #[arg(short = 'q', long, action)]
    pub quiet: bool,
}

fn parse_scale(s: &str) -> Result<f32, String> {
    let scale: f32 = s.trim().parse().map_err(|_| format!("invalid scale '{s}'"))?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(format!("scale '{s}' must be a positive number"))
    }
}

impl Cli {
    /// Invalid page arguments warn and fall back to every page.
    pub fn page_selection(&self) -> PageSelection {
        match parse_page_arg(self.page.as_deref()) {
            Ok(PageSelection::Single(page)) => {
                println!("{}", format!("Processing only page {page}").blue());
                PageSelection::Single(page)
            }
            Ok(selection) => selection,
            Err(e) => {
                eprintln!("{}", format!("Warning: {e}, processing all pages").yellow());
                PageSelection::All
            }
        }
    }

    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            ratio: self.ratio,
            target: (!self.no_resize).then_some((self.width, self.height)),
            filter: self.filter.into(),
            render_scale: self.scale,
            show_progress: !self.quiet,
        }
    }

    pub fn output_root(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| self.input_dir.clone())
    }
}
