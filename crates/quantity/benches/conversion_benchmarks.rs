use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use tilestock_quantity::{PiecesPerBox, format_preview, normalize, parse_entry};

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for per_box in [1u32, 4, 6, 12] {
        group.bench_with_input(BenchmarkId::from_parameter(per_box), &per_box, |b, &p| {
            b.iter(|| normalize(black_box(1_234_567), black_box(p)))
        });
    }
    group.finish();
}

fn bench_entry_to_preview(c: &mut Criterion) {
    let per_box = PiecesPerBox::new(6).expect("valid pieces per box");
    c.bench_function("parse_entry+preview", |b| {
        b.iter(|| {
            let pieces = parse_entry(black_box("13")).unwrap_or(0);
            format_preview(0, pieces, per_box)
        })
    });
}

criterion_group!(benches, bench_normalize, bench_entry_to_preview);
criterion_main!(benches);
