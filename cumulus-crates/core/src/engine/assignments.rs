use std::collections::BTreeMap;

use crate::containers::KeyedVec;
use crate::cumulus_assert_moderate;
use crate::engine::variables::DomainId;
use crate::engine::IntDomainEvent;

/// The integer domains of all the variables in the store.
///
/// Every mutation either shrinks a domain, is a no-op (the update is not tighter than the current
/// domain), or fails with [`EmptyDomain`] in which case the domain is left untouched. Each
/// shrinking mutation records the kinds of change as [`DomainChange`]s.
#[derive(Clone, Default, Debug)]
pub struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    events: Vec<DomainChange>,
    num_domain_changes: usize,
}

/// Indicates that a domain update would have removed every value from a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// A change which happened to the domain of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainChange {
    pub domain: DomainId,
    pub event: IntDomainEvent,
}

impl Assignments {
    pub fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        cumulus_assert_moderate!(lower_bound <= upper_bound, "Cannot create an empty domain");
        self.domains.push(IntegerDomain {
            lower_bound,
            upper_bound,
            holes: BTreeMap::default(),
        })
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    /// The number of domain changes that have been applied since the creation of the store. This
    /// number only grows, comparing it before and after a call indicates whether the call changed
    /// any domain.
    pub fn num_domain_changes(&self) -> usize {
        self.num_domain_changes
    }

    /// Removes and returns the changes which have been recorded since the last call.
    pub fn drain_domain_events(&mut self) -> impl Iterator<Item = DomainChange> + '_ {
        self.events.drain(..)
    }

    fn record(&mut self, domain: DomainId, event: IntDomainEvent) {
        self.events.push(DomainChange { domain, event });
        self.num_domain_changes += 1;

        if event != IntDomainEvent::Removal && self.is_domain_assigned(domain) {
            self.events.push(DomainChange {
                domain,
                event: IntDomainEvent::Assign,
            });
        }
    }
}

impl Assignments {
    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        self.get_lower_bound(domain_id) == self.get_upper_bound(domain_id)
    }

    pub fn get_domain_iterator(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.get_domain_intervals(domain_id)
            .into_iter()
            .flat_map(|(from, to)| from..=to)
    }

    /// Returns the maximal runs of consecutive values in the domain as inclusive `(from, to)`
    /// pairs, in increasing order.
    pub fn get_domain_intervals(&self, domain_id: DomainId) -> Vec<(i32, i32)> {
        let domain = &self.domains[domain_id];

        let mut intervals = Vec::new();
        let mut start = domain.lower_bound;
        for (&hole_start, &hole_end) in domain.holes.iter() {
            intervals.push((start, hole_start - 1));
            start = hole_end + 1;
        }
        intervals.push((start, domain.upper_bound));

        intervals
    }
}

impl Assignments {
    pub fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = &mut self.domains[domain_id];
        if new_lower_bound <= domain.lower_bound {
            return Ok(());
        }
        if new_lower_bound > domain.upper_bound {
            return Err(EmptyDomain);
        }

        domain.set_lower_bound(new_lower_bound);
        self.record(domain_id, IntDomainEvent::LowerBound);

        Ok(())
    }

    pub fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = &mut self.domains[domain_id];
        if new_upper_bound >= domain.upper_bound {
            return Ok(());
        }
        if new_upper_bound < domain.lower_bound {
            return Err(EmptyDomain);
        }

        domain.set_upper_bound(new_upper_bound);
        self.record(domain_id, IntDomainEvent::UpperBound);

        Ok(())
    }

    pub fn remove_value_from_domain(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.remove_interval_from_domain(domain_id, value, value)
    }

    /// Removes the values in the inclusive interval `[from, to]` from the domain.
    pub fn remove_interval_from_domain(
        &mut self,
        domain_id: DomainId,
        from: i32,
        to: i32,
    ) -> Result<(), EmptyDomain> {
        let lower_bound = self.get_lower_bound(domain_id);
        let upper_bound = self.get_upper_bound(domain_id);

        let from = from.max(lower_bound);
        let to = to.min(upper_bound);
        if from > to {
            return Ok(());
        }

        match (from == lower_bound, to == upper_bound) {
            (true, true) => Err(EmptyDomain),
            (true, false) => self.tighten_lower_bound(domain_id, to + 1),
            (false, true) => self.tighten_upper_bound(domain_id, from - 1),
            (false, false) => {
                if self.domains[domain_id].remove_inner_interval(from, to) {
                    self.record(domain_id, IntDomainEvent::Removal);
                }

                Ok(())
            }
        }
    }
}

/// An integer domain represented by its bounds and the intervals removed from between them.
///
/// The holes map the first value of every removed interval to its last value (inclusive).
/// Invariant: the holes are disjoint and never adjacent, the bounds are never part of a hole, and
/// there are no holes outside the bounds.
#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: BTreeMap<i32, i32>,
}

impl IntegerDomain {
    /// Returns the hole which contains `value`, if there is one.
    fn hole_containing(&self, value: i32) -> Option<(i32, i32)> {
        self.holes
            .range(..=value)
            .next_back()
            .filter(|&(_, &hole_end)| hole_end >= value)
            .map(|(&hole_start, &hole_end)| (hole_start, hole_end))
    }

    fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value
            && value <= self.upper_bound
            && self.hole_containing(value).is_none()
    }

    fn set_lower_bound(&mut self, value: i32) {
        self.lower_bound = match self.hole_containing(value) {
            Some((_, hole_end)) => hole_end + 1,
            None => value,
        };
        self.holes = self.holes.split_off(&self.lower_bound);
    }

    fn set_upper_bound(&mut self, value: i32) {
        self.upper_bound = match self.hole_containing(value) {
            Some((hole_start, _)) => hole_start - 1,
            None => value,
        };
        let _ = self.holes.split_off(&self.upper_bound);
    }

    /// Removes `[from, to]`, which lies strictly between the bounds, merging it with the holes it
    /// overlaps or touches. Returns whether any value was removed.
    fn remove_inner_interval(&mut self, from: i32, to: i32) -> bool {
        cumulus_assert_moderate!(self.lower_bound < from && from <= to && to < self.upper_bound);

        let mut merged_start = from;
        let mut merged_end = to;

        if let Some((&hole_start, &hole_end)) = self.holes.range(..=from).next_back() {
            if hole_end >= to {
                return false;
            }
            if hole_end >= from - 1 {
                merged_start = hole_start;
                let _ = self.holes.remove(&hole_start);
            }
        }

        let touched = self
            .holes
            .range(from..=to + 1)
            .map(|(&hole_start, _)| hole_start)
            .collect::<Vec<_>>();
        for hole_start in touched {
            if let Some(hole_end) = self.holes.remove(&hole_start) {
                merged_end = merged_end.max(hole_end);
            }
        }

        let _ = self.holes.insert(merged_start, merged_end);
        true
    }
}
