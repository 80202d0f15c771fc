#[macro_use]
pub mod macros;

pub mod currency;
pub mod energy;
pub mod power;
pub mod price;
mod zero;

pub use self::zero::Zero;
