pub mod get;
pub mod list;

pub use get::{GetTokenError, GetTokenQuery};
pub use list::{ListTokensError, ListTokensQuery};
