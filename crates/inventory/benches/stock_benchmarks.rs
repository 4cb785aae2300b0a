use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tilestock_inventory::StockCounters;
use tilestock_quantity::{PiecesPerBox, RawQuantity};

fn bench_availability(c: &mut Criterion) {
    let per_box = PiecesPerBox::new(5).expect("valid pieces per box");
    let counters = StockCounters::new(
        RawQuantity::new(120, 3),
        RawQuantity::new(40, 9),
        RawQuantity::new(2, 0),
        RawQuantity::new(1, 4),
    );
    c.bench_function("availability", |b| {
        b.iter(|| black_box(counters).availability(per_box))
    });
    c.bench_function("is_low_stock", |b| {
        b.iter(|| black_box(counters).is_low_stock(per_box, black_box(90)))
    });
}

criterion_group!(benches, bench_availability);
criterion_main!(benches);
