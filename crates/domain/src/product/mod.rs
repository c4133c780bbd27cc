//! Product record, value objects, input validation, storage capability and service.

mod factory;
mod model;
mod repository;
mod service;
mod value_objects;

pub use factory::{CreateProduct, ProductFactory, UpdateProduct};
pub use model::{NewProduct, Product, ProductChanges};
pub use self::repository::ProductRepository;
pub use service::ProductService;
pub use value_objects::{Category, Price, UnknownCategory};
