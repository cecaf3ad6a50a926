use crate::data::{Candidate, Offering, OfferingId, ResourceId, Room, RoomId, Slot};
use crate::error::UnassignableOfferingError;
use itertools::Itertools;
use log::{info, trace};
use std::collections::BTreeMap;
use std::ops::Range;

/// Expands rooms x offerings x preferred starts into the feasible candidate
/// set. A real room is eligible only when the offering's demand limit fits
/// its capacity; the overflow placeholder is eligible at every preferred
/// start regardless of demand.
///
/// The result is in canonical candidate order and deduplicated, so it does
/// not depend on the iteration order of the inputs. Infeasible
/// (demand > capacity) triples are never materialized.
pub fn generate_candidates(rooms: &[Room], offerings: &[Offering]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for offering in offerings {
        for &start in &offering.preferred_starts {
            for room in rooms {
                if offering.demand_limit <= room.capacity {
                    candidates.push(Candidate {
                        offering: offering.id,
                        resource: ResourceId::Room(room.id),
                        start,
                    });
                }
            }
            candidates.push(Candidate {
                offering: offering.id,
                resource: ResourceId::Overflow,
                start,
            });
        }
    }
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

/// Owns the candidate set plus the data both constraint families need:
/// per-offering candidate groups (exactly one selected each) and per-slot
/// capacities (selected count bounded for real rooms). Built fresh per
/// solve; a model never contains an offering without candidates.
#[derive(Debug, Clone)]
pub struct ConstraintModel {
    candidates: Vec<Candidate>,
    offerings: Vec<OfferingId>,
    capacities: BTreeMap<Slot, u32>,
}

/// Validates assignability and constructs the model.
///
/// Fails with [`UnassignableOfferingError`] when any offering has an empty
/// preferred-start list; the error names every such offering and the whole
/// build is abandoned rather than silently narrowing the instance.
pub fn build(
    rooms: &[Room],
    offerings: &[Offering],
) -> Result<ConstraintModel, UnassignableOfferingError> {
    let unassignable: Vec<OfferingId> = offerings
        .iter()
        .filter(|o| o.preferred_starts.is_empty())
        .map(|o| o.id)
        .sorted_unstable()
        .collect();
    if !unassignable.is_empty() {
        return Err(UnassignableOfferingError {
            offerings: unassignable,
        });
    }

    let candidates = generate_candidates(rooms, offerings);
    info!(
        "Built placement model with {} candidates for {} offerings across {} rooms",
        candidates.len(),
        offerings.len(),
        rooms.len()
    );
    trace!(
        "{} candidates out of a theoretical maximum of {}",
        candidates.len(),
        offerings
            .iter()
            .map(|o| o.preferred_starts.len() * (rooms.len() + 1))
            .sum::<usize>()
    );

    let capacity_by_room: BTreeMap<RoomId, u32> =
        rooms.iter().map(|r| (r.id, r.capacity)).collect();
    let capacities: BTreeMap<Slot, u32> = candidates
        .iter()
        .filter_map(|c| match c.resource {
            ResourceId::Room(id) => Some((c.slot(), capacity_by_room[&id])),
            ResourceId::Overflow => None,
        })
        .collect();
    let offering_ids: Vec<OfferingId> = candidates.iter().map(|c| c.offering).dedup().collect();

    Ok(ConstraintModel {
        candidates,
        offerings: offering_ids,
        capacities,
    })
}

impl ConstraintModel {
    /// All candidates, in canonical order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Offering ids with at least one candidate, ascending.
    pub fn offerings(&self) -> &[OfferingId] {
        &self.offerings
    }

    /// Capacity of every real slot touched by a candidate. Overflow slots
    /// are unbounded and never appear here.
    pub fn slot_capacities(&self) -> &BTreeMap<Slot, u32> {
        &self.capacities
    }

    /// The exactly-one family: for each offering, the contiguous index
    /// range of its candidates within `candidates()`.
    pub fn assignment_groups(&self) -> Vec<(OfferingId, Range<usize>)> {
        let mut groups = Vec::with_capacity(self.offerings.len());
        let mut begin = 0;
        while begin < self.candidates.len() {
            let offering = self.candidates[begin].offering;
            let mut end = begin + 1;
            while end < self.candidates.len() && self.candidates[end].offering == offering {
                end += 1;
            }
            groups.push((offering, begin..end));
            begin = end;
        }
        groups
    }

    /// The capacity family: for each bounded slot, the indices of the
    /// candidates competing for it. Grouped by slot value, so iteration
    /// order of the underlying input never shows through.
    pub fn capacity_groups(&self) -> BTreeMap<Slot, Vec<usize>> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_overflow())
            .map(|(index, c)| (c.slot(), index))
            .into_group_map()
            .into_iter()
            .collect()
    }

    /// Objective value of a selection: one penalty unit per offering
    /// placed on the overflow placeholder, unweighted.
    pub fn objective(&self, selected: &[Candidate]) -> usize {
        selected.iter().filter(|c| c.is_overflow()).count()
    }
}
