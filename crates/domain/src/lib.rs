//! Domain layer for the records service.
//!
//! This crate provides:
//! - [`User`] and [`Product`] records with their factories and validation rules
//! - Storage capabilities layered on the generic repository ([`UserRepository`], [`ProductRepository`])
//! - [`UserService`] and [`ProductService`], which publish one event per mutation
//! - [`DomainError`] and its classification into an [`common::ErrorKind`]

pub mod error;
pub mod fields;
pub mod lifecycle;
pub mod product;
pub mod user;

pub use error::{DomainError, FieldViolation, ValidationError};
pub use lifecycle::EventKind;
pub use product::{
    Category, CreateProduct, NewProduct, Price, Product, ProductChanges, ProductFactory,
    ProductRepository, ProductService, UnknownCategory, UpdateProduct,
};
pub use user::{
    CreateUser, EmailUniqueness, NewUser, UpdateUser, User, UserChanges, UserFactory,
    UserRepository, UserService,
};
