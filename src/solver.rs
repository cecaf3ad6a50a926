use crate::data::{Assignment, Candidate, OfferingId, ResourceId, Slot};
use crate::error::SolveError;
use crate::flow::FlowNetwork;
use crate::model::ConstraintModel;
use log::info;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Caller-side controls for one solve. Both knobs are optional; a default
/// control never interrupts the search.
#[derive(Debug, Clone, Default)]
pub struct SolveControl {
    pub deadline: Option<Instant>,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SolveControl {
    fn interrupted(&self) -> bool {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Solves the placement model with no deadline or cancellation.
pub fn solve(model: &ConstraintModel) -> Result<Assignment, SolveError> {
    solve_with(model, &SolveControl::default())
}

/// Finds a selection of candidates satisfying both constraint families
/// with the fewest offerings on the overflow placeholder.
///
/// The model reduces to a minimum-cost flow: source -> one node per
/// offering (supply 1) -> candidate edges (capacity 1, cost 1 only for
/// overflow) -> one node per distinct slot (capacity bounded for real
/// rooms) -> sink. A flow of one unit per offering decodes back into the
/// assignment. Nodes and edges are laid down in canonical candidate order,
/// which is also the documented tie-break between equally-costed optima.
pub fn solve_with(model: &ConstraintModel, control: &SolveControl) -> Result<Assignment, SolveError> {
    let start_time = Instant::now();
    let offerings = model.offerings();

    // lookups
    let offering_index: HashMap<OfferingId, usize> = offerings
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, index))
        .collect();
    let slot_list: Vec<Slot> = model
        .candidates()
        .iter()
        .map(Candidate::slot)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let slot_index: HashMap<Slot, usize> = slot_list
        .iter()
        .enumerate()
        .map(|(index, &slot)| (slot, index))
        .collect();

    // network layout
    let source = 0;
    let first_offering = 1;
    let first_slot = first_offering + offerings.len();
    let sink = first_slot + slot_list.len();
    let mut network = FlowNetwork::new(sink + 1);

    for index in 0..offerings.len() {
        network.add_edge(source, first_offering + index, 1, 0);
    }
    let candidate_edges: Vec<usize> = model
        .candidates()
        .iter()
        .map(|candidate| {
            let cost = if candidate.is_overflow() { 1 } else { 0 };
            network.add_edge(
                first_offering + offering_index[&candidate.offering],
                first_slot + slot_index[&candidate.slot()],
                1,
                cost,
            )
        })
        .collect();
    for (index, slot) in slot_list.iter().enumerate() {
        let capacity = match slot.resource {
            ResourceId::Room(_) => i64::from(model.slot_capacities()[slot]),
            ResourceId::Overflow => offerings.len() as i64,
        };
        network.add_edge(first_slot + index, sink, capacity, 0);
    }

    info!(
        "Starting min-cost flow over {} candidates ({} offerings, {} slots)",
        model.candidates().len(),
        offerings.len(),
        slot_list.len()
    );
    let required = offerings.len() as i64;
    let summary = network
        .augment(source, sink, required, || control.interrupted())
        .ok_or(SolveError::Cancelled)?;
    if summary.flow < required {
        return Err(SolveError::NoFeasibleAssignment {
            required: required as usize,
            placed: summary.flow as usize,
        });
    }

    // selected candidates are exactly the saturated candidate edges; the
    // canonical candidate order carries over to the output
    let mut selected = Vec::with_capacity(offerings.len());
    for (index, candidate) in model.candidates().iter().enumerate() {
        if network.flow_on(candidate_edges[index]) > 0 {
            selected.push(*candidate);
        }
    }
    info!(
        "Optimal assignment found in {:.2?}: {} of {} offerings overflowed",
        start_time.elapsed(),
        summary.cost,
        offerings.len()
    );

    Ok(Assignment { selected })
}
