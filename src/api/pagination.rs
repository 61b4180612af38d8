use serde::Deserialize;

use crate::error::ApiError;

/// Records served per page on every paginated endpoint.
pub const PAGE_SIZE: usize = 10;

/// `?page=N` query string shared by the paginated endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// Validate a page number without slicing anything. Handlers that mutate
/// state call this up front so a bad page never follows a committed write.
pub fn check_page(page: Option<i64>) -> Result<i64, ApiError> {
    let page = page.unwrap_or(1);
    if page <= 0 {
        return Err(ApiError::bad_request("page numbers start at 1"));
    }
    Ok(page)
}

/// Slice a full ordered result set down to one page.
///
/// Pages are 1-indexed and default to 1. A page number of zero or less is a
/// client error; a page past the end of the data yields the empty slice, and
/// the caller decides whether that means "not found".
pub fn paginate<T>(items: &[T], page: Option<i64>) -> Result<&[T], ApiError> {
    let page = check_page(page)?;

    let start = (page as usize - 1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return Ok(&[]);
    }

    let end = (start + PAGE_SIZE).min(items.len());
    Ok(&items[start..end])
}
