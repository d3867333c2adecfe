//! Identity classes and the floor-scope authorization rule.
//!
//! Two mutually exclusive identity classes exist per request: the global
//! admin (shared credential) and floor-scoped staff. Every feedback-level
//! decision goes through [`Identity`] so the fail-closed rule lives in one
//! place.

use std::collections::BTreeSet;

use crate::types::DbId;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// The global admin: unscoped authority over all locations and feedback.
    Admin,
    /// A personnel account limited to its assigned floors.
    Staff { user_id: DbId, floors: BTreeSet<i64> },
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Admin)
    }

    /// The floor filter to apply when listing feedback.
    ///
    /// `None` means unscoped (admin). An empty set means the caller sees
    /// nothing -- an account with no assigned floors has no visibility.
    pub fn floor_scope(&self) -> Option<&BTreeSet<i64>> {
        match self {
            Identity::Admin => None,
            Identity::Staff { floors, .. } => Some(floors),
        }
    }

    /// Whether this caller may act on feedback at the given location floor.
    ///
    /// Staff are denied when the location has no floor at all: a floor-less
    /// location belongs to no one's scope.
    pub fn may_act_on(&self, floor: Option<i64>) -> bool {
        match self {
            Identity::Admin => true,
            Identity::Staff { floors, .. } => {
                floor.is_some_and(|f| floors.contains(&f))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(floors: &[i64]) -> Identity {
        Identity::Staff {
            user_id: 7,
            floors: floors.iter().copied().collect(),
        }
    }

    #[test]
    fn admin_acts_on_any_floor() {
        assert!(Identity::Admin.may_act_on(Some(1)));
        assert!(Identity::Admin.may_act_on(Some(99)));
        assert!(Identity::Admin.may_act_on(None));
    }

    #[test]
    fn admin_listing_is_unscoped() {
        assert_eq!(Identity::Admin.floor_scope(), None);
    }

    #[test]
    fn staff_acts_only_within_assigned_floors() {
        let caller = staff(&[2, 3]);
        assert!(caller.may_act_on(Some(2)));
        assert!(caller.may_act_on(Some(3)));
        assert!(!caller.may_act_on(Some(1)));
    }

    #[test]
    fn staff_with_no_floors_is_denied_everything() {
        let caller = staff(&[]);
        assert!(!caller.may_act_on(Some(1)));
        assert!(!caller.may_act_on(None));
        // The listing scope is an explicit empty set, not "everything".
        assert_eq!(caller.floor_scope().map(|s| s.len()), Some(0));
    }

    #[test]
    fn floorless_location_is_outside_every_staff_scope() {
        let caller = staff(&[1, 2, 3]);
        assert!(!caller.may_act_on(None));
    }
}
