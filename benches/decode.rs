use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rawdecode_rs::image_pipeline::debayer::{reconstruct, split};
use rawdecode_rs::image_pipeline::raw::decode;
use rawdecode_rs::image_pipeline::{BayerOrder, FormatDescriptor, PreviewConfig};

fn generate_mock_raw_data(format: &FormatDescriptor) -> Vec<u8> {
    (0..format.required_len()).map(|i| (i % 251) as u8).collect()
}

fn benchmark_decode_by_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_encoding");

    for encoding in ["raw8", "raw10", "raw12", "raw16"] {
        let format = FormatDescriptor::builder(2048, 1536)
            .encoding(encoding)
            .build()
            .expect("valid bench format");
        let data = generate_mock_raw_data(&format);

        group.bench_with_input(BenchmarkId::from_parameter(encoding), &data, |b, data| {
            b.iter(|| decode(black_box(data), &format));
        });
    }

    group.finish();
}

fn benchmark_decode_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw10_by_size");

    let sizes = vec![(640, 480, "640x480"), (1920, 1080, "1920x1080"), (4096, 3072, "4096x3072")];

    for (width, height, label) in sizes {
        let format = FormatDescriptor::builder(width, height)
            .encoding("raw10")
            .build()
            .expect("valid bench format");
        let data = generate_mock_raw_data(&format);

        group.bench_with_input(BenchmarkId::from_parameter(label), &data, |b, data| {
            b.iter(|| decode(black_box(data), &format));
        });
    }

    group.finish();
}

fn benchmark_split_and_preview(c: &mut Criterion) {
    let format = FormatDescriptor::builder(2048, 1536)
        .encoding("raw12")
        .bayer_order(BayerOrder::Rggb)
        .build()
        .expect("valid bench format");
    let plane = decode(&generate_mock_raw_data(&format), &format).expect("decodable bench data");
    let channels = split(&plane, BayerOrder::Rggb);
    let config = PreviewConfig::default();

    c.bench_function("split_2048x1536", |b| {
        b.iter(|| split(black_box(&plane), BayerOrder::Rggb));
    });

    c.bench_function("reconstruct_1024x768", |b| {
        b.iter(|| reconstruct(black_box(&channels), &config));
    });
}

criterion_group!(
    benches,
    benchmark_decode_by_encoding,
    benchmark_decode_sizes,
    benchmark_split_and_preview
);
criterion_main!(benches);
