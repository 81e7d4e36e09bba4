//! Pure data structures: catalog types and the cart entity.

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
