use crate::models::Arrow;

use super::cohort::cohort_size;

/// Maximum number of arrows a single month column may hold.
pub const MAX_ARROWS_PER_MONTH: usize = 3;

/// Whether a cohort of `size` arrows has room for one more.
pub fn can_add(size: usize) -> bool {
    size < MAX_ARROWS_PER_MONTH
}

/// Whether another arrow may be added to `month`.
pub fn can_add_to(arrows: &[Arrow], month: &str) -> bool {
    can_add(cohort_size(arrows, month))
}
