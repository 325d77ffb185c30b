//! Windowed pagination and the compact page-number list.

/// Page size used when none is configured.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page sizes offered to the user.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Above this many pages the page list is truncated with ellipses.
const MAX_UNTRUNCATED_PAGES: usize = 7;

/// Current page and page size. Both are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Changes the page size and returns to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    /// Moves to `page`, clamped into `[1, total_pages(count)]`.
    pub fn go_to(&mut self, page: usize, count: usize) {
        self.current_page = page.clamp(1, total_pages(count, self.items_per_page));
    }

    /// Re-applies the page bounds for a result of `count` items.
    pub fn clamp(&mut self, count: usize) {
        self.go_to(self.current_page, count);
    }

    pub fn window(&self, count: usize) -> PageWindow {
        let total_pages = total_pages(count, self.items_per_page);
        let current_page = self.current_page.clamp(1, total_pages);
        let start = ((current_page - 1) * self.items_per_page).min(count);
        let end = (start + self.items_per_page).min(count);
        PageWindow {
            current_page,
            total_pages,
            start,
            end,
            total_items: count,
        }
    }
}

/// Number of pages for `count` items; at least 1.
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1)).max(1)
}

/// The slice bounds of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    /// Start index into the result, inclusive.
    pub start: usize,
    /// End index into the result, exclusive.
    pub end: usize,
    pub total_items: usize,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.start.min(items.len())..self.end.min(items.len())]
    }

    pub fn page_numbers(&self) -> Vec<PageMarker> {
        page_numbers(self.current_page, self.total_pages)
    }
}

/// Entry of the page-number list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Compact page-number list. Up to seven pages are listed in full;
/// otherwise the first and last page, the current page and its immediate
/// neighbours are shown, with an ellipsis over each gap.
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<PageMarker> {
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);

    if total <= MAX_UNTRUNCATED_PAGES {
        return (1..=total).map(PageMarker::Page).collect();
    }

    let mut markers = vec![PageMarker::Page(1)];
    if current > 3 {
        markers.push(PageMarker::Ellipsis);
    }
    let from = current.saturating_sub(1).max(2);
    let to = (current + 1).min(total - 1);
    markers.extend((from..=to).map(PageMarker::Page));
    if current + 2 < total {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(total));
    markers
}
