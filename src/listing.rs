//! Search and pagination for the project list.

use crate::project::Project;

/// Rows per page in the project list.
pub const PAGE_SIZE: usize = 5;

/// Projects whose string fields contain `query`, ignoring case, in store order.
pub fn filter_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let needle = query.to_lowercase();
    projects.iter().filter(|p| p.matches(&needle)).collect()
}

/// Number of pages needed for `count` rows. Never less than one.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Clamp a 1-based page number into `[1, total_pages(count)]`.
pub fn clamp_page(page: usize, count: usize) -> usize {
    page.clamp(1, total_pages(count))
}

/// One page of a filtered result.
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page actually shown, after clamping.
    pub number: usize,
    pub total_pages: usize,
    /// 0-based index of the first row on this page.
    pub start: usize,
    pub total: usize,
}

impl<T> Page<'_, T> {
    /// "Rows 6-10 of 12", or "Rows 0-0 of 0" when nothing matched.
    pub fn rows_label(&self) -> String {
        if self.total == 0 {
            "Rows 0-0 of 0".to_string()
        } else {
            format!("Rows {}-{} of {}", self.start + 1, self.start + self.items.len(), self.total)
        }
    }
}

/// Slice out page `page` (1-based, clamped) of `items`.
pub fn paginate<T>(items: &[T], page: usize) -> Page<'_, T> {
    let total = items.len();
    let number = clamp_page(page, total);
    let start = ((number - 1) * PAGE_SIZE).min(total);
    let end = (start + PAGE_SIZE).min(total);
    Page {
        items: &items[start..end],
        number,
        total_pages: total_pages(total),
        start,
        total,
    }
}

/// Filter text and page position of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    filter: String,
    page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        ListState {
            filter: String::new(),
            page: 1,
        }
    }
}

impl ListState {
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the filter text. Always returns to the first page.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 1;
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.page = 1;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.page = 1;
    }

    /// Jump to a page; it is clamped against `count` filtered rows.
    pub fn set_page(&mut self, page: usize, count: usize) {
        self.page = clamp_page(page, count);
    }

    pub fn next_page(&mut self, count: usize) {
        self.set_page(self.page + 1, count);
    }

    pub fn prev_page(&mut self, count: usize) {
        self.set_page(self.page.saturating_sub(1), count);
    }

    /// Pull the page back into range after the filtered count shrank.
    pub fn clamp(&mut self, count: usize) {
        self.page = clamp_page(self.page, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::seed_projects;
    use chrono::NaiveDate;

    fn numbered(n: u64) -> Vec<Project> {
        (1..=n)
            .map(|id| Project {
                id,
                name: format!("Project {id}"),
                description: String::new(),
                status: "Not Started".into(),
                progress: 0,
                deadline: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_filter_matches_description_only_term() {
        let seed = seed_projects();
        let hits = filter_projects(&seed, "OVERHAUL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Website Redesign");

        let hits = filter_projects(&seed, "legacy cluster");
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);

        assert_eq!(filter_projects(&seed, "").len(), seed.len());
        assert!(filter_projects(&seed, "no such text").is_empty());
    }

    #[test]
    fn test_pages_of_twelve() {
        let rows = numbered(12);

        let first = paginate(&rows, 1);
        assert_eq!(first.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(first.rows_label(), "Rows 1-5 of 12");

        let third = paginate(&rows, 3);
        assert_eq!(third.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![11, 12]);
        assert_eq!(third.rows_label(), "Rows 11-12 of 12");

        let fourth = paginate(&rows, 4);
        assert_eq!(fourth.number, 3);
        assert_eq!(fourth.total_pages, 3);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let rows: Vec<Project> = Vec::new();
        let page = paginate(&rows, 0);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.rows_label(), "Rows 0-0 of 0");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = ListState::default();
        state.set_page(3, 12);
        assert_eq!(state.page(), 3);
        state.push_filter_char('p');
        assert_eq!(state.page(), 1);

        state.set_page(2, 12);
        state.pop_filter_char();
        assert_eq!(state.page(), 1);
        assert_eq!(state.filter(), "");
    }

    #[test]
    fn test_page_clamps_when_results_shrink() {
        let mut state = ListState::default();
        state.set_page(3, 12);
        state.clamp(6);
        assert_eq!(state.page(), 2);
        state.clamp(0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_next_and_prev_stay_in_bounds() {
        let mut state = ListState::default();
        state.prev_page(12);
        assert_eq!(state.page(), 1);
        state.next_page(12);
        state.next_page(12);
        state.next_page(12);
        assert_eq!(state.page(), 3);
    }
}
