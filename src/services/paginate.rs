//! Fixed-size page windows over ordered lists.

/// Default number of items per page.
pub const PAGE_SIZE: usize = 5;

/// One page of an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// Slice the 1-based `page` out of `items`.
///
/// Pages below 1 are treated as page 1.
pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: usize) -> Page<T> {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let start = (page - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size);

    let slice = if start >= items.len() {
        &items[..0]
    } else {
        &items[start..end.min(items.len())]
    };

    Page {
        items: slice.to_vec(),
        has_more: end < items.len(),
    }
}
