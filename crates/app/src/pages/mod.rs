//! Page controllers
//!
//! Each controller owns one view's state, built from the core state
//! models, and the services it fetches through. Errors stay with the
//! controller that triggered them and map to a [`Notice`].

use std::future::Future;

use storefront::paging::{Keyed, MergeOutcome, Page, PageAccumulator, PageTicket};
use tracing::warn;

use crate::api::ApiError;

pub mod address;
pub mod cart;
pub mod catalog;
mod errors;
mod notice;
pub mod payment;
pub mod protected;

pub use errors::PageError;
pub use notice::Notice;

/// Await `fetch` for `ticket` and merge the result, or record the failure.
pub(crate) async fn merge_fetch<T, C>(
    accumulator: &mut PageAccumulator<T, C>,
    ticket: &PageTicket<C>,
    fetch: impl Future<Output = Result<Page<T>, ApiError>>,
) -> Result<MergeOutcome, PageError>
where
    T: Keyed,
    C: Clone + PartialEq + std::fmt::Debug,
{
    match fetch.await {
        Ok(page) => Ok(accumulator.complete(ticket, page)?),
        Err(error) => {
            warn!(page = ticket.page(), "page fetch failed: {error}");
            accumulator.fail(ticket, error.to_string())?;

            Err(error.into())
        }
    }
}
