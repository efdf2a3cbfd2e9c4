use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
  pub page: usize,
  pub per_page: usize,
}

impl PageRequest {
  /// Creates a request, clamping page and page size to at least 1
  pub fn new(page: usize, per_page: usize) -> Self {
    Self {
      page: page.max(1),
      per_page: per_page.max(1),
    }
  }

  pub fn first(per_page: usize) -> Self {
    Self::new(1, per_page)
  }

  fn offset(&self) -> usize {
    (self.page - 1).saturating_mul(self.per_page)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self::first(DEFAULT_PAGE_SIZE)
  }
}

/// One page of an already filtered listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page: usize,
  pub per_page: usize,
  pub total_items: usize,
  pub total_pages: usize,
}

impl<T> Page<T> {
  /// Slices `items` according to `request`. A page past the end is empty.
  pub fn paginate(items: Vec<T>, request: PageRequest) -> Self {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(request.per_page);

    let items = items
      .into_iter()
      .skip(request.offset())
      .take(request.per_page)
      .collect();

    Self {
      items,
      page: request.page,
      per_page: request.per_page,
      total_items,
      total_pages,
    }
  }

  /// Wraps a full listing as a single page
  pub fn single(items: Vec<T>) -> Self {
    let total_items = items.len();
    Self {
      items,
      page: 1,
      per_page: total_items.max(1),
      total_items,
      total_pages: usize::from(total_items > 0),
    }
  }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items: self.items.into_iter().map(f).collect(),
      page: self.page,
      per_page: self.per_page,
      total_items: self.total_items,
      total_pages: self.total_pages,
    }
  }

  pub fn has_next(&self) -> bool {
    self.page < self.total_pages
  }
}
