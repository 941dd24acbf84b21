pub mod error;
pub mod table;
pub mod types;

pub use error::{RetentionError, RetentionResult};
pub use table::Table;
pub use types::{AgeBracket, CategoryDimension, UserRecord};
