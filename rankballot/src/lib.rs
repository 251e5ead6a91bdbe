mod artifact;
mod catalog;
mod diagnostics;
mod encoding;
mod error;
mod lines;
mod selection;
mod signing;
mod verification;

pub use artifact::*;
pub use catalog::*;
pub use diagnostics::*;
pub use encoding::*;
pub use error::*;
pub use selection::*;
pub use signing::*;
pub use verification::*;
