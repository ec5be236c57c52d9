//! # Domain Models
//!
//! Value types shared by the price pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Case-sensitive ticker as requested |
//! | [`Address`] | Configured token address with a lowercased matching key |
//! | [`Price`] | Non-negative exact decimal price |

mod address;
mod price;
mod symbol;

pub use address::Address;
pub use price::{Price, PriceParseError, PRICE_SCALE};
pub use symbol::Symbol;
