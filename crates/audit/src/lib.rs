// Copyright (C) 2026 Homebook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

#[cfg(test)]
mod tests;

use homebook_domain::{SessionId, Step};

/// The kind of entity that initiated a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// The customer driving the wizard.
    Customer,
    /// The orchestrator itself (e.g. resetting after confirmation).
    System,
}

impl ActorKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::System => "system",
        }
    }
}

/// Represents the entity performing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// What kind of actor this is.
    pub kind: ActorKind,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, kind: ActorKind) -> Self {
        Self { id, kind }
    }

    /// The actor used for transitions the orchestrator performs on its own.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("orchestrator"), ActorKind::System)
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause correlates a transition with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g. request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g. "`ToggleAddon`", "`Advance`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact view of a booking session at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSnapshot {
    /// The wizard step.
    pub step: Step,
    /// The session's transition counter.
    pub version: u64,
    /// The draft generation; changes when the draft is discarded.
    pub generation: u64,
    /// The computed total at this point.
    pub total: u64,
    /// Free-form summary of the draft.
    pub summary: String,
}

impl DraftSnapshot {
    /// Creates a new `DraftSnapshot`.
    #[must_use]
    pub const fn new(step: Step, version: u64, generation: u64, total: u64, summary: String) -> Self {
        Self {
            step,
            version,
            generation,
            total,
            summary,
        }
    }
}

/// An immutable audit event representing a session transition.
///
/// Every successful transition produces exactly one audit event, including
/// transitions that leave the draft unchanged (refused selections, blocked
/// advances).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The session the transition belongs to.
    pub session_id: SessionId,
    /// The actor who initiated this transition.
    pub actor: Actor,
    /// The cause or reason for this transition.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The session before the transition.
    pub before: DraftSnapshot,
    /// The session after the transition.
    pub after: DraftSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    #[must_use]
    pub const fn new(
        session_id: SessionId,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: DraftSnapshot,
        after: DraftSnapshot,
    ) -> Self {
        Self {
            session_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns whether the transition changed the session's step.
    #[must_use]
    pub fn changed_step(&self) -> bool {
        self.before.step != self.after.step
    }
}

/// The ordered audit trail of one booking session.
///
/// The trail keeps at most `capacity` events; the oldest are dropped first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTrail {
    capacity: usize,
    events: std::collections::VecDeque<AuditEvent>,
}

impl AuditTrail {
    /// Default number of events retained per session.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates an empty trail.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            events: std::collections::VecDeque::new(),
        }
    }

    /// Appends an event, evicting the oldest when full.
    pub fn record(&mut self, event: AuditEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Iterates over the retained events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &AuditEvent> {
        self.events.iter()
    }

    /// Returns the most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&AuditEvent> {
        self.events.back()
    }

    /// Returns the number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the trail is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
