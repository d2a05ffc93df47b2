pub mod queries;
pub mod routes;

pub use queries::{GetTokenError, GetTokenQuery, ListTokensError, ListTokensQuery};
pub use routes::tokens_routes;
