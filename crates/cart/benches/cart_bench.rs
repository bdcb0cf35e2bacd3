use cart::{CartService, CartSnapshot, InMemoryCartStorage};
use catalog::Product;
use common::{Money, ProductId};
use criterion::{Criterion, criterion_group, criterion_main};

fn product(id: i64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: "benchmark product".to_string(),
        price: Money::from_rupiah(12_500),
        stock,
        image: None,
        category: None,
    }
}

fn bench_add_item(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("cart/add_item", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = CartService::new(InMemoryCartStorage::new());
                service.add_item(&product(1, 100)).await.unwrap();
            });
        });
    });
}

fn bench_mutation_cycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("cart/add_update_remove_cycle", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = CartService::new(InMemoryCartStorage::new());
                service.add_item(&product(1, 100)).await.unwrap();
                service.set_quantity(ProductId::new(1), 40).await.unwrap();
                service.increment(ProductId::new(1)).await.unwrap();
                service.remove_item(ProductId::new(1)).await.unwrap();
            });
        });
    });
}

fn bench_totals_over_50_lines(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = CartService::new(InMemoryCartStorage::new());

    rt.block_on(async {
        for id in 1..=50 {
            service.add_item(&product(id, 100)).await.unwrap();
            service.set_quantity(ProductId::new(id), 3).await.unwrap();
        }
    });

    c.bench_function("cart/totals_50_lines", |b| {
        b.iter(|| {
            rt.block_on(async {
                let items = service.total_items().await;
                let subtotal = service.subtotal().await;
                assert_eq!(items, 150);
                assert!(subtotal.is_positive());
            });
        });
    });
}

fn bench_snapshot_roundtrip(c: &mut Criterion) {
    let mut snapshot = CartSnapshot::new();
    for id in 1..=50 {
        snapshot.add(&product(id, 100));
    }

    c.bench_function("cart/snapshot_serialize_parse_50_lines", |b| {
        b.iter(|| {
            let json = serde_json::to_string(&snapshot).unwrap();
            let back: CartSnapshot = serde_json::from_str(&json).unwrap();
            assert_eq!(back.len(), 50);
        });
    });
}

criterion_group!(
    benches,
    bench_add_item,
    bench_mutation_cycle,
    bench_totals_over_50_lines,
    bench_snapshot_roundtrip,
);
criterion_main!(benches);
