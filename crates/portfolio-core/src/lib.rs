pub mod error;
pub mod recommend;
pub mod summary;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
