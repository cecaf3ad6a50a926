use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for clarity
pub type RoomId = u32;
pub type OfferingId = u32;
pub type Timeslot = u32;

/// Represents a physical room with a given capacity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub capacity: u32,
}

/// Represents a course offering to be placed at one of its preferred starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: OfferingId,
    pub demand_limit: u32,
    pub preferred_starts: Vec<Timeslot>,
}

/// The complete input for one placement problem.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementInput {
    pub rooms: Vec<Room>,
    pub offerings: Vec<Offering>,
    /// Optional wall-clock limit for the solve, in milliseconds.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

/// Either a real room or the unbounded overflow placeholder.
///
/// The derived order puts every real room before `Overflow`, which is what
/// the canonical candidate order relies on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ResourceId {
    Room(RoomId),
    Overflow,
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Room(id) => write!(f, "room {}", id),
            ResourceId::Overflow => write!(f, "overflow"),
        }
    }
}

/// One (offering, resource, start) decision under consideration.
///
/// Field order defines the canonical candidate order: ascending offering,
/// then resource, then start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Candidate {
    pub offering: OfferingId,
    pub resource: ResourceId,
    pub start: Timeslot,
}

impl Candidate {
    /// The slot this candidate would occupy.
    pub fn slot(&self) -> Slot {
        Slot {
            resource: self.resource,
            start: self.start,
        }
    }

    /// Whether selecting this candidate incurs an overflow penalty.
    pub fn is_overflow(&self) -> bool {
        self.resource == ResourceId::Overflow
    }
}

/// A (resource, start) pair; capacity-bounded for real rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Slot {
    pub resource: ResourceId,
    pub start: Timeslot,
}

/// The solver's selection: exactly one candidate per offering, in
/// canonical order. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub selected: Vec<Candidate>,
}

impl Assignment {
    /// Number of offerings that ended up on the overflow placeholder.
    pub fn overflow_count(&self) -> usize {
        self.selected.iter().filter(|c| c.is_overflow()).count()
    }
}

/// All offerings placed in one slot, ids ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPlacement {
    pub resource: ResourceId,
    pub start: Timeslot,
    pub offerings: Vec<OfferingId>,
}

/// The final room/time view handed to reporting, placements in ascending
/// slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub placements: Vec<SlotPlacement>,
    pub overflow_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order_is_offering_then_resource_then_start() {
        let mut candidates = vec![
            Candidate {
                offering: 2,
                resource: ResourceId::Room(1),
                start: 9,
            },
            Candidate {
                offering: 1,
                resource: ResourceId::Overflow,
                start: 9,
            },
            Candidate {
                offering: 1,
                resource: ResourceId::Room(7),
                start: 9,
            },
            Candidate {
                offering: 1,
                resource: ResourceId::Room(7),
                start: 8,
            },
        ];
        candidates.sort();
        let keys: Vec<_> = candidates
            .iter()
            .map(|c| (c.offering, c.resource, c.start))
            .collect();
        assert_eq!(
            keys,
            vec![
                (1, ResourceId::Room(7), 8),
                (1, ResourceId::Room(7), 9),
                (1, ResourceId::Overflow, 9),
                (2, ResourceId::Room(1), 9),
            ]
        );
    }

    #[test]
    fn test_overflow_sorts_after_every_real_room() {
        assert!(ResourceId::Room(u32::MAX) < ResourceId::Overflow);
    }

    #[test]
    fn test_schedule_view_serializes_camel_case() {
        let view = ScheduleView {
            placements: vec![SlotPlacement {
                resource: ResourceId::Room(1),
                start: 9,
                offerings: vec![3, 4],
            }],
            overflow_count: 0,
        };
        let json = serde_json::to_string(&view).unwrap();
        assert_eq!(
            json,
            r#"{"placements":[{"resource":{"room":1},"start":9,"offerings":[3,4]}],"overflowCount":0}"#
        );
    }

    #[test]
    fn test_placement_input_deadline_defaults_to_none() {
        let input: PlacementInput =
            serde_json::from_str(r#"{"rooms":[],"offerings":[]}"#).unwrap();
        assert!(input.deadline_ms.is_none());
    }
}
