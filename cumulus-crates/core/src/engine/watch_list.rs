use enumset::EnumSet;

use super::IntDomainEvent;
use crate::engine::propagation::PropagatorVarId;
use crate::engine::variables::DomainId;

/// Records which propagators should be woken up upon which events of which domains.
#[derive(Debug, Default, Clone)]
pub struct WatchList {
    watchers: Vec<Watch>,
}

#[derive(Debug, Clone, Copy)]
struct Watch {
    domain: DomainId,
    events: EnumSet<IntDomainEvent>,
    propagator_var: PropagatorVarId,
}

impl WatchList {
    /// Returns the propagator variables which are watching `event` on `domain`.
    pub fn get_affected_propagators(
        &self,
        domain: DomainId,
        event: IntDomainEvent,
    ) -> impl Iterator<Item = PropagatorVarId> + '_ {
        self.watchers
            .iter()
            .filter(move |watch| watch.domain == domain && watch.events.contains(event))
            .map(|watch| watch.propagator_var)
    }

    fn watch(
        &mut self,
        propagator_var: PropagatorVarId,
        domain: DomainId,
        events: EnumSet<IntDomainEvent>,
    ) {
        if let Some(watch) = self
            .watchers
            .iter_mut()
            .find(|watch| watch.domain == domain && watch.propagator_var == propagator_var)
        {
            watch.events |= events;
        } else {
            self.watchers.push(Watch {
                domain,
                events,
                propagator_var,
            });
        }
    }
}

/// Used to register a propagator for notifications about events to a particular variable.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchList,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_var: PropagatorVarId, watch_list: &'a mut WatchList) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub fn watch_all(&mut self, domain: DomainId, events: EnumSet<IntDomainEvent>) {
        self.watch_list.watch(self.propagator_var, domain, events)
    }
}
