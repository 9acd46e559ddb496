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
mod cli;
mod driver;
mod error;
mod geometry;
mod output;
mod pages;
mod pdf;
mod raster;

use crate::cli::Cli;

use clap::Parser;
use colored::Colorize;
use std::time::Instant;

fn main() {
    // Diagnostics are opt-in through RUST_LOG; user-facing lines are printed directly.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();

    let start_time = Instant::now();

    let selection = cli.page_selection();
    let options = cli.options();

    let summary = match driver::run(&cli.input_dir, &cli.output_root(), selection, &options) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    if summary.files > 0 {
        let line = format!(
            "{} page(s) written from {} file(s); {} page(s) and {} file(s) failed",
            summary.pages_written,
            summary.files,
            summary.pages_failed,
            summary.files_failed
        );
        if summary.pages_failed + summary.files_failed > 0 {
            println!("{}", line.yellow());
        } else {
            println!("{}", line.green());
        }
    }

    let duration = start_time.elapsed();
    println!(
        "{}",
        format!("Processing completed in {:.2} seconds", duration.as_secs_f32()).green()
    );
}
