// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the conversion pipeline in the topdf-document crate.

use std::io::Cursor;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use topdf_core::SelectedFile;
use topdf_document::pdf::writer::wrap_text_to_width;
use topdf_document::{ConvertOptions, convert_files};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn sample_png() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 480, Rgb([120, 160, 200])));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .expect("encode fixture PNG");
    buffer.into_inner()
}

fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("Line {i}: the quick brown fox jumps over the lazy dog, again and again."))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Mixed batch of one 640x480 image and a 200-line text file (several pages).
fn bench_convert_batch(c: &mut Criterion) {
    let files = vec![
        SelectedFile::new("photo.png", None, sample_png()),
        SelectedFile::new("notes.txt", None, sample_text(200).into_bytes()),
    ];
    let options = ConvertOptions::default();

    c.bench_function("convert_files (png + 200-line txt)", |b| {
        b.iter(|| {
            let artifact = convert_files(black_box(&files), &options).expect("conversion");
            black_box(artifact.len());
        });
    });
}

fn bench_wrap_text(c: &mut Criterion) {
    let text = sample_text(1_000);
    c.bench_function("wrap_text_to_width (1000 lines, 180mm at 16pt)", |b| {
        b.iter(|| black_box(wrap_text_to_width(black_box(&text), 180.0, 16.0)));
    });
}

criterion_group!(benches, bench_convert_batch, bench_wrap_text);
criterion_main!(benches);
