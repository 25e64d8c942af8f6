//! Contract bindings for the token console.
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod token;

pub use token::IERC20Token;
