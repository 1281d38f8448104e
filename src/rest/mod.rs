//! Typed access to Admin REST resources.
//!
//! - [`resources`]: resource models and clients such as
//!   [`DiscountCodeClient`](resources::DiscountCodeClient)
//! - [`ListOptions`] / [`CountOptions`]: query options, flattened by [`to_query`]
//! - [`Pagination`]: cursors parsed from the `Link` response header
//! - [`ResourceError`]: the error every resource operation returns

mod errors;
mod options;
mod pagination;
pub mod resources;

pub use errors::ResourceError;
pub use options::{to_query, CountOptions, ListOptions};
pub use pagination::{LinkHeaderError, Pagination};
