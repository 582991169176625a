pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod sellers;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 200;
const MAX_OFFSET: i64 = 100_000;

pub(crate) fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Force client-supplied pagination into sane bounds.
pub fn clamp_pagination(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_LIMIT), offset.clamp(0, MAX_OFFSET))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_is_clamped_to_safe_bounds() {
        assert_eq!(clamp_pagination(20, 0), (20, 0));
        assert_eq!(clamp_pagination(0, 0), (1, 0));
        assert_eq!(clamp_pagination(-5, -5), (1, 0));
        assert_eq!(clamp_pagination(10_000, 0), (MAX_LIMIT, 0));
        assert_eq!(clamp_pagination(20, 9_999_999), (20, MAX_OFFSET));
    }
}
