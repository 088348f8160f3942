//! Numbered pagination links.

use smallvec::SmallVec;

/// Longest link row produced by [`page_links`].
const MAX_LINKS: u32 = 7;

/// One entry of a numbered pagination row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A 1-based page number.
    Page(u32),

    /// A gap of one or more pages.
    Ellipsis,
}

/// Pagination links for 1-based page `current` of `total`.
///
/// Up to seven entries: every page when they fit, otherwise the first and
/// last page plus a window around `current`, with gaps as ellipses.
pub fn page_links(current: u32, total: u32) -> SmallVec<[PageLink; 7]> {
    let mut links = SmallVec::new();

    if total == 0 {
        return links;
    }

    if total <= MAX_LINKS {
        links.extend((1..=total).map(PageLink::Page));
        return links;
    }

    let current = current.clamp(1, total);

    if current <= 4 {
        links.extend((1..=5).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total));
    } else if current >= total - 3 {
        links.push(PageLink::Page(1));
        links.push(PageLink::Ellipsis);
        links.extend((total - 4..=total).map(PageLink::Page));
    } else {
        links.push(PageLink::Page(1));
        links.push(PageLink::Ellipsis);
        links.extend((current - 1..=current + 1).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total));
    }

    links
}
