use crate::types::Record;

/// How many numeric page controls to show on each side of the current page.
const PAGE_WINDOW: usize = 2;

/// One element of the pagination control bar, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageControl {
    Previous { enabled: bool },
    Page { number: usize, active: bool },
    Ellipsis,
    Next { enabled: bool },
}

/// Holds one fetched result set in memory and slices it into fixed-size
/// pages.
///
/// The current page is 1-based and always stays within
/// `1..=max(1, total_pages)`. Loading a new result set or changing the page
/// size resets it to the first page.
#[derive(Debug)]
pub struct ResultPager {
    records: Vec<Record>,
    total_count: usize,
    current_page: usize,
    page_size: usize,
}

impl ResultPager {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: vec![],
            total_count: 0,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replaces the current result set. An empty `records` is not an error;
    /// the pager simply reports empty and the view renders a placeholder.
    pub fn load(&mut self, records: Vec<Record>, total_count: usize) {
        self.records = records;
        self.total_count = total_count;
        self.current_page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Clamps `page` into the valid range. Returns whether the current page
    /// actually changed; navigating to the page already shown is a no-op.
    pub fn go_to_page(&mut self, page: i64) -> bool {
        let clamped = page.clamp(1, self.total_pages().max(1) as i64) as usize;
        if clamped == self.current_page {
            return false;
        }
        self.current_page = clamped;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backend-declared record count, as opposed to what was actually
    /// received.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[allow(dead_code)]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        (self.records.len() + self.page_size - 1) / self.page_size
    }

    /// The full result set, for the export artifacts.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The records of the current page.
    pub fn page_slice(&self) -> &[Record] {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.records.len());
        if start >= end {
            return &[];
        }
        &self.records[start..end]
    }

    /// 1-based inclusive display range of the current page, e.g. (101, 200).
    pub fn page_range(&self) -> (usize, usize) {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.records.len());
        (start.min(end) + 1, end)
    }

    /// Builds the control bar: previous/next at the edges, numeric controls
    /// for the window around the current page, and first/last shortcuts with
    /// an ellipsis when the window does not reach the respective edge.
    pub fn controls(&self) -> Vec<PageControl> {
        let total = self.total_pages().max(1);
        let current = self.current_page;
        let window_start = current.saturating_sub(PAGE_WINDOW).max(1);
        let window_end = (current + PAGE_WINDOW).min(total);

        let mut controls = vec![PageControl::Previous { enabled: current > 1 }];
        if window_start > 1 {
            controls.push(PageControl::Page { number: 1, active: false });
            if window_start > 2 {
                controls.push(PageControl::Ellipsis);
            }
        }
        for number in window_start..=window_end {
            controls.push(PageControl::Page {
                number,
                active: number == current,
            });
        }
        if window_end < total {
            if window_end < total - 1 {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(PageControl::Page { number: total, active: false });
        }
        controls.push(PageControl::Next { enabled: current < total });
        controls
    }
}
