use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// `page` floors to 1, `limit` clamps to [1, 100]. Out-of-range input is
/// corrected, not rejected.
pub fn clamp_page_limit(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    (page, limit)
}

pub fn offset(page: u32, limit: u32) -> i64 {
    (page as i64 - 1) * limit as i64
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub limit: u32,
    #[schema(example = 42)]
    pub total: i64,
    #[serde(rename = "totalPages")]
    #[schema(example = 5)]
    pub total_pages: i64,
}

impl PageMeta {
    /// `total` must come from a count query scoped to the same predicate
    /// as the page itself.
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let total_pages = (total + limit as i64 - 1) / limit as i64;
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(clamp_page_limit(None, None), (1, 10));
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(clamp_page_limit(Some(0), Some(1000)), (1, 100));
        assert_eq!(clamp_page_limit(Some(5), Some(0)), (5, 1));
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(3, 20), 40);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PageMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PageMeta::new(1, 10, 11).total_pages, 2);
    }

    #[test]
    fn meta_serializes_total_pages_in_camel_case() {
        let value = serde_json::to_value(PageMeta::new(2, 10, 25)).unwrap();
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["page"], 2);
    }
}
