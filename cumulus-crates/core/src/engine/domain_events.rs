use std::fmt::Display;

use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A description of the kinds of events that can happen on a domain variable.
#[derive(Debug, EnumSetType, Hash)]
pub enum IntDomainEvent {
    /// Event where an (integer) variable domain collapses to a single value.
    Assign,
    /// Event where an (integer) variable domain tightens the lower bound.
    LowerBound,
    /// Event where an (integer) variable domain tightens the upper bound.
    UpperBound,
    /// Event where an (integer) variable domain removes values strictly inside its bounds.
    Removal,
}

impl Display for IntDomainEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntDomainEvent::Assign => write!(f, "[Event:Assign]"),
            IntDomainEvent::LowerBound => write!(f, "[Event:LB]"),
            IntDomainEvent::UpperBound => write!(f, "[Event:UB]"),
            IntDomainEvent::Removal => write!(f, "[Event:Remove]"),
        }
    }
}

impl DomainEvents {
    /// DomainEvents with both lower and upper bound tightening (but not other value removal).
    pub const BOUNDS: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        IntDomainEvent::LowerBound | IntDomainEvent::UpperBound
    ));
    /// DomainEvents with lower and upper bound tightening, assigning to a single value, and
    /// value removal.
    pub const ANY_INT: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        IntDomainEvent::Assign
            | IntDomainEvent::LowerBound
            | IntDomainEvent::UpperBound
            | IntDomainEvent::Removal
    ));
    /// DomainEvents with only lower bound tightening.
    pub const LOWER_BOUND: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(IntDomainEvent::LowerBound));
    /// DomainEvents with only upper bound tightening.
    pub const UPPER_BOUND: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(IntDomainEvent::UpperBound));
    /// DomainEvents with only assigning to a single value.
    pub const ASSIGN: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(IntDomainEvent::Assign));
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    int_events: EnumSet<IntDomainEvent>,
}

impl DomainEvents {
    pub(crate) const fn create_with_int_events(
        int_events: EnumSet<IntDomainEvent>,
    ) -> DomainEvents {
        DomainEvents { int_events }
    }

    pub fn get_int_events(&self) -> EnumSet<IntDomainEvent> {
        self.int_events
    }
}
