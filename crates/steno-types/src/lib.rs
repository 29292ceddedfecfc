pub mod error;
pub mod session;
pub mod statement;

pub use error::{Error, Result};
pub use session::*;
pub use statement::*;
