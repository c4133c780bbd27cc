//! Integration tests for the product service and its scans.

use std::sync::Arc;

use domain::{Category, CreateProduct, DomainError, Product, ProductService, UpdateProduct};
use events::{DomainEvent, EventPublisher, HandlerError, handler_fn};
use repository::InMemoryRepository;
use tokio::sync::Mutex;

fn create_service() -> ProductService<InMemoryRepository<Product>> {
    ProductService::new(InMemoryRepository::new(), Arc::new(EventPublisher::new()))
}

async fn seed(service: &ProductService<InMemoryRepository<Product>>) -> Vec<Product> {
    let inputs = [
        CreateProduct::new("Laptop", 1299.0, "electronics", "Thin and light notebook"),
        CreateProduct::new("Headphones", 199.99, "electronics", "Noise cancelling over-ear")
            .in_stock(false),
        CreateProduct::new("Rain Jacket", 89.5, "clothing", "Waterproof shell for hiking"),
        CreateProduct::new("Cookbook", 35.0, "books", "Recipes for quick weeknight dinners"),
        CreateProduct::new("Yoga Mat", 25.0, "sports", "Non-slip mat for home workouts")
            .in_stock(false),
    ];

    let mut stored = Vec::new();
    for input in inputs {
        stored.push(service.create_product(input).await.unwrap());
    }
    stored
}

mod scans {
    use super::*;

    #[tokio::test]
    async fn find_by_category_equals_filtered_find_all() {
        let service = create_service();
        seed(&service).await;
        let all = service.get_all_products().await;

        for category in Category::ALL {
            let expected: Vec<Product> = all
                .iter()
                .filter(|p| p.category() == category)
                .cloned()
                .collect();
            assert_eq!(service.find_by_category(category).await, expected);
        }
        assert!(service.find_by_category(Category::Home).await.is_empty());
    }

    #[tokio::test]
    async fn find_in_stock_excludes_out_of_stock() {
        let service = create_service();
        seed(&service).await;

        let names: Vec<String> = service
            .find_in_stock()
            .await
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Laptop", "Rain Jacket", "Cookbook"]);
    }

    #[tokio::test]
    async fn find_all_is_in_creation_order() {
        let service = create_service();
        let stored = seed(&service).await;
        assert_eq!(service.get_all_products().await, stored);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_name_and_description() {
        let service = create_service();
        seed(&service).await;

        let hits = service.search("HOME").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Yoga Mat");

        let hits = service.search("noise").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Headphones");

        assert!(service.search("submarine").await.is_empty());
    }

    #[tokio::test]
    async fn restocking_moves_product_into_stock_scan() {
        let service = create_service();
        let stored = seed(&service).await;
        let headphones = &stored[1];

        service
            .update_product(
                &headphones.id(),
                UpdateProduct {
                    in_stock: Some(true),
                    ..UpdateProduct::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(service.find_in_stock().await.len(), 4);
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn mutations_publish_product_events_in_order() {
        let publisher = Arc::new(EventPublisher::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        for kind in ["product.created", "product.updated", "product.deleted"] {
            let log = log.clone();
            publisher
                .subscribe(
                    kind,
                    Arc::new(handler_fn("recorder", move |event: DomainEvent| {
                        let log = log.clone();
                        async move {
                            log.lock().await.push(event.event_type);
                            Ok::<(), HandlerError>(())
                        }
                    })),
                )
                .await;
        }
        let service = ProductService::new(InMemoryRepository::<Product>::new(), publisher);

        let product = service
            .create_product(CreateProduct::new("Cookbook", 35.0, "books", "Recipes for dinner"))
            .await
            .unwrap();
        let updated = service
            .update_product(
                &product.id(),
                UpdateProduct {
                    price: Some(30.0),
                    ..UpdateProduct::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price().cents(), 3000);
        assert!(updated.updated_at() > product.updated_at());

        service.delete_product(&product.id()).await.unwrap();

        assert_eq!(
            *log.lock().await,
            vec!["product.created", "product.updated", "product.deleted"]
        );
    }

    #[tokio::test]
    async fn validation_failure_lists_every_field() {
        let service = create_service();
        let err = service
            .create_product(CreateProduct {
                name: Some("X".to_string()),
                price: Some(0.0),
                category: Some("garden".to_string()),
                description: None,
                in_stock: None,
            })
            .await
            .unwrap_err();

        match err {
            DomainError::Validation(v) => {
                assert_eq!(v.violations().len(), 4);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(service.get_all_products().await.is_empty());
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let service = create_service();
        let stored = seed(&service).await;

        service.delete_product(&stored[0].id()).await.unwrap();
        let err = service.delete_product(&stored[0].id()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(service.get_all_products().await.len(), stored.len() - 1);
    }
}
