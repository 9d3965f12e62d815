pub mod products;
pub mod ws;
