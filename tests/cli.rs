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
//! End-to-end runs of the `pagecrop` binary against generated PDFs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pagecrop").unwrap();
    cmd.current_dir(dir).arg("--quiet");
    cmd
}

/// Blank PDF with `pages` pages of `width x height` points, built with lopdf.
fn blank_pdf(pages: usize, width: i64, height: i64) -> Vec<u8> {
    use lopdf::{ dictionary, Object, Stream };

    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {},
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(pages as i64),
        })
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn png_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn no_pdfs_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No PDF files found"));
}

#[test]
fn converts_all_pages_to_fixed_size() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("slides.pdf"), blank_pdf(3, 612, 792)).unwrap();

    cmd(dir.path()).assert().success().stdout(predicate::str::contains("Converting slides.pdf (3 pages)"));

    let out = dir.path().join("slides");
    assert_eq!(png_names(&out), ["page_001.png", "page_002.png", "page_003.png"]);
    for name in png_names(&out) {
        assert_eq!(image::image_dimensions(out.join(name)).unwrap(), (1440, 1080));
    }
}

#[test]
fn single_page_argument() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("slides.pdf"), blank_pdf(3, 612, 792)).unwrap();

    cmd(dir.path()).arg("2").assert().success().stdout(predicate::str::contains("Processing only page 2"));

    assert_eq!(png_names(&dir.path().join("slides")), ["page_002.png"]);
}

#[test]
fn page_past_the_end_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("slides.pdf"), blank_pdf(3, 612, 792)).unwrap();

    cmd(dir.path())
        .arg("5")
        .assert()
        .success()
        .stderr(predicate::str::contains("Page 5 does not exist (PDF has only 3 pages)"));

    assert!(png_names(&dir.path().join("slides")).is_empty());
}

#[test]
fn invalid_page_argument_falls_back_to_all_pages() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Report.PDF"), blank_pdf(2, 612, 792)).unwrap();

    cmd(dir.path())
        .arg("two")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid page number 'two', processing all pages"));

    assert_eq!(png_names(&dir.path().join("Report")), ["page_001.png", "page_002.png"]);
}

#[test]
fn no_resize_keeps_rendered_crop() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("wide.pdf"), blank_pdf(1, 800, 450)).unwrap();

    cmd(dir.path()).args(["--no-resize", "--scale", "1"]).assert().success();

    let (w, h) = image::image_dimensions(dir.path().join("wide").join("page_001.png")).unwrap();
    assert!(h.abs_diff(450) <= 1, "{w}x{h}");
    assert!(w.abs_diff(600) <= 1, "{w}x{h}");
}

#[test]
fn broken_pdf_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a_broken.pdf"), b"%PDF-1.4 garbage").unwrap();
    fs::write(dir.path().join("b_good.pdf"), blank_pdf(1, 612, 792)).unwrap();

    cmd(dir.path()).assert().success();

    assert_eq!(png_names(&dir.path().join("b_good")), ["page_001.png"]);
}

#[test]
fn separate_output_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("doc.pdf"), blank_pdf(1, 612, 792)).unwrap();

    cmd(input.path()).arg("--output-dir").arg(output.path()).assert().success();

    assert_eq!(png_names(&output.path().join("doc")), ["page_001.png"]);
    assert!(!input.path().join("doc").exists());
}

#[test]
fn missing_input_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["--input-dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list"));
}

#[test]
fn tiny_scale_fails_pages_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.pdf"), blank_pdf(2, 200, 100)).unwrap();
    fs::write(dir.path().join("b.pdf"), blank_pdf(1, 200, 100)).unwrap();

    cmd(dir.path())
        .args(["--scale", "0.001"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error converting a.pdf page 2"))
        .stderr(predicate::str::contains("Error converting b.pdf page 1"));

    assert!(png_names(&dir.path().join("a")).is_empty());
    assert!(png_names(&dir.path().join("b")).is_empty());
}

#[test]
fn non_positive_scale_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    for bad in ["0", "NaN", "-1"] {
        cmd(dir.path()).arg(format!("--scale={bad}")).assert().failure();
    }
}

#[cfg(target_os = "linux")]
#[test]
fn same_stem_pdf_is_refused_instead_of_overwriting() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("x.PDF"), blank_pdf(2, 800, 450)).unwrap();
    fs::write(dir.path().join("x.pdf"), blank_pdf(1, 612, 792)).unwrap();

    cmd(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("output directory"))
        .stderr(predicate::str::contains("is already used by"))
        .stdout(predicate::str::contains("2 page(s) written from 2 file(s); 0 page(s) and 1 file(s) failed"));

    assert_eq!(png_names(&dir.path().join("x")), ["page_001.png", "page_002.png"]);
}

#[test]
fn rust_log_shows_crop_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("wide.pdf"), blank_pdf(1, 800, 450)).unwrap();

    cmd(dir.path())
        .env("RUST_LOG", "pagecrop=debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("-> crop (200, 0)-(1400, 900) 1200x900"));
}
