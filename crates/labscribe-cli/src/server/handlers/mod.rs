//! API request handlers.

mod extract;
mod health;
mod normalize;
mod process;
mod summary;

pub use extract::*;
pub use health::*;
pub use normalize::*;
pub use process::*;
pub use summary::*;
