//! Domain repositories.

mod shop;

pub use shop::ShopRepository;
