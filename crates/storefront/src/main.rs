//! Storefront demo entry point.
//!
//! Wires a session over in-memory gateways and a SQLite cart slot,
//! then walks one shopping flow end to end, logging each step.

use cart::SqliteCartStorage;
use catalog::{Category, InMemoryCatalogGateway, Product};
use common::{CategoryId, Money, ProductId};
use orders::{InMemoryOrderGateway, PaymentProof};
use storefront::{Config, Session, telemetry};

fn demo_products() -> Vec<Product> {
    let minuman = Category {
        id: CategoryId::new(1),
        name: "Minuman".to_string(),
    };
    let camilan = Category {
        id: CategoryId::new(2),
        name: "Camilan".to_string(),
    };

    vec![
        Product {
            id: ProductId::new(1),
            name: "Kopi Gayo 250g".to_string(),
            description: "Biji kopi arabika dari dataran tinggi Gayo".to_string(),
            price: Money::from_rupiah(55_000),
            stock: 8,
            image: Some("kopi-gayo.jpg".to_string()),
            category: Some(minuman.clone()),
        },
        Product {
            id: ProductId::new(2),
            name: "Teh Melati".to_string(),
            description: "Teh hijau melati, 50 kantong".to_string(),
            price: Money::from_rupiah(12_000),
            stock: 30,
            image: None,
            category: Some(minuman),
        },
        Product {
            id: ProductId::new(3),
            name: "Keripik Singkong".to_string(),
            description: "Keripik singkong pedas manis 200g".to_string(),
            price: Money::from_rupiah(15_000),
            stock: 20,
            image: None,
            category: Some(camilan),
        },
    ]
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    telemetry::init(&config.log_level);

    // 1. Wire the collaborators
    let products = demo_products();
    let catalog = InMemoryCatalogGateway::with_products(products.clone());
    let backend = InMemoryOrderGateway::new();
    for product in &products {
        backend.seed_product(product.id, product.name.clone(), product.price, product.stock);
    }
    let storage = SqliteCartStorage::connect(&config.cart_db)
        .await
        .expect("failed to open cart slot");

    // 2. Start the session (hydrates any persisted cart)
    let session = Session::start(&config, catalog, backend, storage).await;

    // 3. Browse and fill the cart
    let listing = session.browse().await.expect("catalog fetch failed");
    tracing::info!(count = listing.len(), "catalog loaded");

    session.add_to_cart(listing[0].id).await.expect("add failed");
    session.add_to_cart(listing[0].id).await.expect("add failed");
    session.add_to_cart(listing[2].id).await.expect("add failed");

    let totals = session.cart_totals().await;
    tracing::info!(items = totals.items, subtotal = %totals.subtotal, "cart ready");

    // 4. Check out
    let receipt = session.checkout().await.expect("checkout failed");
    tracing::info!(
        order_id = %receipt.order_id,
        status = %receipt.status,
        total = %receipt.total,
        "order placed"
    );

    // 5. Upload the payment proof
    let proof = PaymentProof::new("bukti-transfer.jpg", "image/jpeg", vec![0u8; 1024]);
    let updated = session
        .upload_payment_proof(receipt.order_id, proof)
        .await
        .expect("proof upload failed");
    tracing::info!(order_id = %updated.id, status = %updated.status, "payment proof uploaded");

    // 6. Show the order history
    let orders = session.orders().await.expect("orders fetch failed");
    for order in &orders {
        tracing::info!(
            order_id = %order.id,
            status = order.status.label(),
            total = %order.total,
            items = order.total_items(),
            "order on record"
        );
    }
}
