//! Benchmarks for unexam reconstruction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the full pipeline over synthetic two-column exam pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use unexam::source::LayoutPage;
use unexam::{BoundingBox, ExamExtractor, ExtractOptions, LayoutDocument};

/// Creates a synthetic exam with `page_count` pages of ten questions each.
///
/// Every page also carries one question whose four choices are tables.
fn create_test_exam(page_count: usize) -> LayoutDocument {
    let pages = (0..page_count)
        .map(|p| {
            let mut page = LayoutPage::a4(p as u32 + 1);
            for q in 0..10 {
                let number = p * 11 + q + 1;
                let (x, top) = if q < 5 {
                    (40.0, 60.0 + q as f32 * 60.0)
                } else {
                    (310.0, 60.0 + (q - 5) as f32 * 60.0)
                };
                page = page
                    .with_text_line(x, top, &format!("{}. 다음 설명 중 옳은 것은?", number))
                    .with_text_line(x, top + 15.0, "①첫째 선택지 ②둘째 선택지")
                    .with_text_line(x, top + 30.0, "③셋째 선택지 ④넷째 선택지");
            }

            let number = p * 11 + 11;
            page = page
                .with_text_line(40.0, 400.0, &format!("{}. 행렬 matrix(1:4, 2) 의 결과는?", number))
                .with_text_line(40.0, 420.0, "①")
                .with_text_line(160.0, 420.0, "②")
                .with_text_line(40.0, 520.0, "③")
                .with_text_line(160.0, 520.0, "④");
            for (i, (x, y)) in [(50.0, 435.0), (170.0, 435.0), (50.0, 535.0), (170.0, 535.0)]
                .into_iter()
                .enumerate()
            {
                page = page.with_table(
                    BoundingBox::new(x, y, x + 90.0, y + 60.0),
                    vec![vec![Some(format!("{}", i + 1)), Some("0".to_string())]],
                );
            }
            page
        })
        .collect();

    LayoutDocument::new(pages)
}

/// Benchmark input detection.
fn bench_format_detection(c: &mut Criterion) {
    let json = serde_json::to_vec(&create_test_exam(1)).unwrap();
    let pdf_data = b"%PDF-1.7\n%test";

    c.bench_function("detect_layout_json", |b| {
        b.iter(|| unexam::detect_format_from_bytes(black_box(&json)).unwrap());
    });

    c.bench_function("detect_pdf", |b| {
        b.iter(|| unexam::detect_format_from_bytes(black_box(pdf_data)).is_err());
    });
}

/// Benchmark reconstruction at various sizes.
fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction");
    let extractor = ExamExtractor::new(ExtractOptions::default());

    for page_count in [1, 5, 20].iter() {
        let doc = create_test_exam(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract(black_box(&doc)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark loading plus reconstruction from JSON bytes.
fn bench_extract_bytes(c: &mut Criterion) {
    let data = serde_json::to_vec(&create_test_exam(5)).unwrap();

    c.bench_function("extract_bytes_5_pages", |b| {
        b.iter(|| unexam::extract_bytes(black_box(&data)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_reconstruction,
    bench_extract_bytes,
);
criterion_main!(benches);
