//! Month rename cascade.

use crate::models::{Activity, Arrow};

/// Collections after a rename, with how many entities moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migrated {
    pub activities: Vec<Activity>,
    pub arrows: Vec<Arrow>,
    pub moved_activities: usize,
    pub moved_arrows: usize,
}

/// Point every activity and arrow on month `old` at month `new`.
///
/// Order is preserved and entities on other months pass through untouched.
pub fn migrate(old: &str, new: &str, activities: Vec<Activity>, arrows: Vec<Arrow>) -> Migrated {
    let mut moved_activities = 0;
    let activities = activities
        .into_iter()
        .map(|mut a| {
            if a.month == old {
                a.month = new.to_string();
                moved_activities += 1;
            }
            a
        })
        .collect();

    let mut moved_arrows = 0;
    let arrows = arrows
        .into_iter()
        .map(|mut a| {
            if a.month == old {
                a.month = new.to_string();
                moved_arrows += 1;
            }
            a
        })
        .collect();

    Migrated {
        activities,
        arrows,
        moved_activities,
        moved_arrows,
    }
}
