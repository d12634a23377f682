use serde::Serialize;

/// One page of a ranked sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// ceil(count / page_size); zero when the page size is zero
#[inline]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Presentation Slice: items `[(page-1)*size, page*size)` clamped to the
/// sequence. Page numbers start at 1; page 0 and pages past the end are
/// empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();

    let slice = if page == 0 || page_size == 0 {
        &items[0..0]
    } else {
        let start = (page - 1).saturating_mul(page_size).min(total_items);
        let end = page.saturating_mul(page_size).min(total_items);
        &items[start..end]
    };

    Page {
        items: slice.to_vec(),
        page,
        page_size,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}
