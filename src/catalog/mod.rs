pub mod error;
pub mod product;
pub mod service;
pub mod subscriber;

pub use error::CatalogError;
pub use product::Product;
pub use service::CatalogService;
pub use subscriber::Subscriber;
