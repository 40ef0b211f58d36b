use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u32 = 5;
const MAX_PAGE_SIZE: u32 = 50;

/// Page-number pagination parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// One page of a paginated response
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: usize,
    pub page: u32,
    pub page_size: u32,
    pub next_page: Option<u32>,
    pub previous_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Slices a full result list into the requested page.
///
/// Page numbers start at 1; the page size defaults to 5 and is capped at 50.
/// A page past the end yields an empty result list, not an error.
pub fn paginate<T>(items: Vec<T>, params: &PageParams) -> Paginated<T> {
    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = params.page.unwrap_or(1).max(1);

    let count = items.len();
    let total_pages = count.div_ceil(page_size as usize).max(1) as u32;
    let start = (page as usize - 1) * page_size as usize;

    let results: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Paginated {
        count,
        page,
        page_size,
        next_page: (page < total_pages).then(|| page + 1),
        previous_page: (page > 1 && page <= total_pages).then(|| page - 1),
        message: None,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u32, page_size: u32) -> PageParams {
        PageParams {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    #[test]
    fn test_default_page_size_is_five() {
        let page = paginate((0..12).collect(), &PageParams::default());
        assert_eq!(page.results, vec![0, 1, 2, 3, 4]);
        assert_eq!(page.count, 12);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.previous_page, None);
    }

    #[test]
    fn test_middle_page() {
        let page = paginate((0..12).collect(), &params(2, 5));
        assert_eq!(page.results, vec![5, 6, 7, 8, 9]);
        assert_eq!(page.next_page, Some(3));
        assert_eq!(page.previous_page, Some(1));
    }

    #[test]
    fn test_last_page_is_partial() {
        let page = paginate((0..12).collect(), &params(3, 5));
        assert_eq!(page.results, vec![10, 11]);
        assert_eq!(page.next_page, None);
        assert_eq!(page.previous_page, Some(2));
    }

    #[test]
    fn test_page_size_capped_at_fifty() {
        let page = paginate((0..100).collect(), &params(1, 500));
        assert_eq!(page.results.len(), 50);
        assert_eq!(page.page_size, 50);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = paginate((0..3).collect::<Vec<i32>>(), &params(9, 5));
        assert!(page.results.is_empty());
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_empty_input() {
        let page = paginate(Vec::<i32>::new(), &PageParams::default());
        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
        assert_eq!(page.next_page, None);
        assert_eq!(page.previous_page, None);
    }
}
