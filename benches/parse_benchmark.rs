//! Performance benchmarks for parsing and writing tag-value documents.
//!
//! Run with: cargo bench --bench parse_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spdx_tagvalue::{parse_tag_value, write_tag_value_string};
use std::fmt::Write;
use std::hint::black_box;

/// Generate a document with `packages` packages of `files_per_package` files
/// each, plus a handful of explicit relationships and annotations.
fn generate_document(packages: usize, files_per_package: usize) -> String {
    let mut text = String::from(
        "SPDXVersion: SPDX-2.3\n\
         DataLicense: CC0-1.0\n\
         SPDXID: SPDXRef-DOCUMENT\n\
         DocumentName: benchmark-document\n\
         DocumentNamespace: https://example.org/spdxdocs/benchmark\n\
         Creator: Tool: generator-1.0\n\
         Created: 2024-01-01T00:00:00Z\n\n",
    );

    for p in 0..packages {
        let _ = write!(
            text,
            "PackageName: package-{p}\n\
             SPDXID: SPDXRef-Package-{p}\n\
             PackageVersion: 1.{}.{}\n\
             PackageDownloadLocation: https://example.org/package-{p}.tar.gz\n\
             FilesAnalyzed: true\n\
             PackageLicenseConcluded: Apache-2.0 OR MIT\n\
             PackageCopyrightText: <text>Copyright example {p}</text>\n",
            p % 10,
            p % 100,
        );
        for f in 0..files_per_package {
            let _ = write!(
                text,
                "FileName: ./src/package-{p}/file-{f}.rs\n\
                 SPDXID: SPDXRef-File-{p}-{f}\n\
                 FileType: SOURCE\n\
                 FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n\
                 LicenseConcluded: MIT\n",
            );
        }
        text.push('\n');
    }

    for p in 0..packages.min(20) {
        let _ = write!(
            text,
            "Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package-{p}\n"
        );
    }
    text.push_str(
        "\nAnnotator: Person: Benchmark Author\n\
         AnnotationDate: 2024-01-01T00:00:00Z\n\
         AnnotationType: OTHER\n\
         SPDXREF: SPDXRef-DOCUMENT\n\
         AnnotationComment: generated document\n",
    );
    text
}

fn bench_parse_small(c: &mut Criterion) {
    let text = generate_document(10, 5);
    c.bench_function("parse_10_packages", |b| {
        b.iter(|| {
            let _ = black_box(parse_tag_value(black_box(&text)));
        })
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let text = generate_document(200, 20);
    c.bench_function("parse_200_packages", |b| {
        b.iter(|| {
            let _ = black_box(parse_tag_value(black_box(&text)));
        })
    });
}

fn bench_parse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");
    for packages in [10, 50, 100, 200] {
        let text = generate_document(packages, 10);
        group.bench_with_input(
            BenchmarkId::from_parameter(packages),
            &text,
            |b, text| {
                b.iter(|| {
                    let _ = black_box(parse_tag_value(black_box(text)));
                })
            },
        );
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let text = generate_document(100, 10);
    let document = parse_tag_value(&text).expect("benchmark document parses");
    c.bench_function("write_100_packages", |b| {
        b.iter(|| {
            let _ = black_box(write_tag_value_string(black_box(&document)));
        })
    });
}

fn bench_round_trip(c: &mut Criterion) {
    let text = generate_document(50, 10);
    c.bench_function("round_trip_50_packages", |b| {
        b.iter(|| {
            let document = parse_tag_value(black_box(&text)).expect("parses");
            let _ = black_box(write_tag_value_string(&document));
        })
    });
}

criterion_group!(
    benches,
    bench_parse_small,
    bench_parse_large,
    bench_parse_scaling,
    bench_write,
    bench_round_trip,
);

criterion_main!(benches);
