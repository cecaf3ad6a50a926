use crate::data::{Assignment, OfferingId, ScheduleView, Slot, SlotPlacement};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Folds the solver's selection into the room/time view handed to
/// reporting. Slots ascend, and so do the offering ids inside each slot,
/// so identical assignments always render identically.
pub fn project(assignment: &Assignment) -> ScheduleView {
    let by_slot: BTreeMap<Slot, Vec<OfferingId>> = assignment
        .selected
        .iter()
        .map(|candidate| (candidate.slot(), candidate.offering))
        .into_group_map()
        .into_iter()
        .collect();
    let placements = by_slot
        .into_iter()
        .map(|(slot, mut offerings)| {
            offerings.sort_unstable();
            SlotPlacement {
                resource: slot.resource,
                start: slot.start,
                offerings,
            }
        })
        .collect();
    ScheduleView {
        placements,
        overflow_count: assignment.overflow_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Candidate, ResourceId};

    fn candidate(offering: u32, resource: ResourceId, start: u32) -> Candidate {
        Candidate {
            offering,
            resource,
            start,
        }
    }

    #[test]
    fn test_groups_by_slot_with_sorted_offerings() {
        let assignment = Assignment {
            selected: vec![
                candidate(5, ResourceId::Room(1), 9),
                candidate(3, ResourceId::Room(1), 9),
                candidate(4, ResourceId::Room(2), 9),
            ],
        };
        let view = project(&assignment);
        assert_eq!(view.overflow_count, 0);
        assert_eq!(
            view.placements,
            vec![
                SlotPlacement {
                    resource: ResourceId::Room(1),
                    start: 9,
                    offerings: vec![3, 5],
                },
                SlotPlacement {
                    resource: ResourceId::Room(2),
                    start: 9,
                    offerings: vec![4],
                },
            ]
        );
    }

    #[test]
    fn test_overflow_slots_render_last_and_are_counted() {
        let assignment = Assignment {
            selected: vec![
                candidate(1, ResourceId::Overflow, 8),
                candidate(2, ResourceId::Room(9), 8),
            ],
        };
        let view = project(&assignment);
        assert_eq!(view.overflow_count, 1);
        assert_eq!(view.placements.last().unwrap().resource, ResourceId::Overflow);
    }

    #[test]
    fn test_empty_assignment_projects_to_empty_view() {
        let view = project(&Assignment { selected: vec![] });
        assert!(view.placements.is_empty());
        assert_eq!(view.overflow_count, 0);
    }
}
