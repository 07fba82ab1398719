//! Page arithmetic for the artworks listing: page counts, clamping, and the pager link window.

pub const PAGE_SIZE: u32 = 10;
pub const PAGE_LINKS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    pub page_size: u32,
    pub page_links: u32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            page_links: PAGE_LINKS,
        }
    }
}

/// `max(1, ceil(total_records / page_size))`.
pub fn total_pages(total_records: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_records.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    let last = i64::from(total_pages.max(1));
    // Clamped into [1, u32::MAX], so the conversion cannot fail.
    u32::try_from(requested.clamp(1, last)).unwrap_or(1)
}

/// Contiguous run of at most `links` page numbers around `page`, kept inside `[1, total_pages]`.
///
/// Near the last page the window slides back so it still shows `min(links, total_pages)`
/// entries.
pub fn page_window(page: u32, total_pages: u32, links: u32) -> Vec<u32> {
    if links == 0 {
        return Vec::new();
    }
    let total_pages = total_pages.max(1);
    let half = links / 2;

    let mut start = page.saturating_sub(half).max(1);
    let mut end = start.saturating_add(links - 1);
    if end > total_pages {
        end = total_pages;
        start = end.saturating_sub(links - 1).max(1);
    }
    (start..=end).collect()
}
