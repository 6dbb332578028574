//! Offset/limit pagination for review listings

/// Upper bound applied to `limit` unless configured otherwise
pub const DEFAULT_MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Clamp `limit` into `[1, max]`
    pub fn clamped(self, max: u32) -> Self {
        Self {
            limit: self.limit.clamp(1, max.max(1)),
            offset: self.offset,
        }
    }

    /// Slice an already ordered sequence down to this page
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(Page::new(500, 3).clamped(100), Page::new(100, 3));
        assert_eq!(Page::new(0, 0).clamped(100), Page::new(1, 0));
        assert_eq!(Page::new(10, 0).clamped(100), Page::new(10, 0));
        // A zero maximum still yields a usable page
        assert_eq!(Page::new(10, 0).clamped(0), Page::new(1, 0));
    }

    #[test]
    fn test_apply() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(Page::new(3, 0).apply(items.clone()), vec![0, 1, 2]);
        assert_eq!(Page::new(3, 8).apply(items.clone()), vec![8, 9]);
        assert!(Page::new(3, 20).apply(items).is_empty());
    }
}
