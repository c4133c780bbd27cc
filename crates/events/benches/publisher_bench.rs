use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use events::{DomainEvent, EventHandler, EventPublisher, HandlerError, handler_fn};

fn make_event() -> DomainEvent {
    DomainEvent::builder()
        .event_type("product.updated")
        .aggregate_type("Product")
        .aggregate_id("bench")
        .payload_raw(serde_json::json!({
            "id": "bench",
            "name": "Widget",
            "price": 19.99,
            "category": "electronics",
            "inStock": true
        }))
        .try_build()
        .unwrap()
}

fn noop_handler() -> Arc<dyn EventHandler> {
    Arc::new(handler_fn("noop", |_event: DomainEvent| async {
        Ok::<(), HandlerError>(())
    }))
}

async fn publisher_with(n: usize) -> EventPublisher {
    let publisher = EventPublisher::new();
    for _ in 0..n {
        publisher.subscribe("product.updated", noop_handler()).await;
    }
    publisher
}

fn bench_publish_no_subscribers(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let publisher = rt.block_on(publisher_with(0));

    c.bench_function("events/publish_0_handlers", |b| {
        b.iter(|| {
            rt.block_on(async {
                publisher.publish(make_event()).await;
            });
        });
    });
}

fn bench_publish_fan_out(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let publisher = rt.block_on(publisher_with(10));

    c.bench_function("events/publish_10_handlers", |b| {
        b.iter(|| {
            rt.block_on(async {
                let report = publisher.publish(make_event()).await;
                assert_eq!(report.delivered, 10);
            });
        });
    });
}

fn bench_subscribe_unsubscribe(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let publisher = rt.block_on(publisher_with(50));

    c.bench_function("events/subscribe_unsubscribe", |b| {
        b.iter(|| {
            rt.block_on(async {
                let handler = noop_handler();
                publisher.subscribe("product.updated", handler.clone()).await;
                publisher.unsubscribe("product.updated", &handler).await;
            });
        });
    });
}

criterion_group!(
    benches,
    bench_publish_no_subscribers,
    bench_publish_fan_out,
    bench_subscribe_unsubscribe
);
criterion_main!(benches);
