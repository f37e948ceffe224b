//=========================================================================
// Fallback Handler
//=========================================================================
//
// Where a handler call ends up when no proxy in the chain handled it, and
// where raw codes with no dispatcher end up.
//
// Policy (from EngineOptions):
//   debug_events         → log the event once per handler name
//   no_unhandled_events  → return UnhandledEventError (fatal to the loop)
//   neither              → silent
//   flag missing         → configuration error, logged once
//
// The "seen" sets only grow. Repeats of the same unhandled handler or
// unknown code are suppressed so a stream of motion events cannot flood
// the log.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::{error, warn};

//=== Internal Dependencies ===============================================

use super::handlers::HandlerId;
use crate::core::error::{ConfigError, UnhandledEventError};
use crate::core::event::{codes, Event, EventCode};

//=== UnhandledEventPolicy ================================================

/// Unhandled-event policy flags. `None` means the flag was never
/// configured, which is reported rather than guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnhandledEventPolicy {
    pub debug_events: Option<bool>,
    pub no_unhandled_events: Option<bool>,
}

impl UnhandledEventPolicy {
    /// Both flags configured and off.
    pub const SILENT: Self = Self {
        debug_events: Some(false),
        no_unhandled_events: Some(false),
    };

    /// Both flags resolved, or the name of the first missing one.
    fn resolve(self) -> Result<(bool, bool), ConfigError> {
        let debug = self
            .debug_events
            .ok_or(ConfigError::MissingPolicyFlag("debug_events"))?;
        let strict = self
            .no_unhandled_events
            .ok_or(ConfigError::MissingPolicyFlag("no_unhandled_events"))?;
        Ok((debug, strict))
    }
}

//=== FallbackHandler =====================================================

pub struct FallbackHandler {
    policy: UnhandledEventPolicy,
    seen_handlers: HashSet<HandlerId>,
    seen_codes: HashSet<EventCode>,
    counts: HashMap<HandlerId, u64>,
    config_error_reported: bool,
}

impl FallbackHandler {
    pub fn new(policy: UnhandledEventPolicy) -> Self {
        Self {
            policy,
            seen_handlers: HashSet::new(),
            seen_codes: HashSet::new(),
            counts: HashMap::new(),
            config_error_reported: false,
        }
    }

    pub fn policy(&self) -> UnhandledEventPolicy {
        self.policy
    }

    /// Records an unhandled call to handler `id` and applies the policy.
    pub fn unhandled(&mut self, id: HandlerId, event: &Event) -> Result<(), UnhandledEventError> {
        *self.counts.entry(id).or_insert(0) += 1;

        let (debug, strict) = match self.policy.resolve() {
            Ok(flags) => flags,
            Err(err) => {
                if !self.config_error_reported {
                    self.config_error_reported = true;
                    error!("Engine misconfigured: {}; unhandled events are not reported", err);
                }
                return Ok(());
            }
        };

        let first = self.seen_handlers.insert(id);

        if strict {
            let err = UnhandledEventError {
                handler: id.name(),
                category: id.category(),
                code: event.code(),
            };
            error!("{}: {}", err, event);
            return Err(err);
        }

        if debug && first {
            warn!(
                "Unhandled {} event: {} {}",
                id.category(),
                id.name(),
                event
            );
        }
        Ok(())
    }

    /// Records an event whose code has no dispatcher, or whose dispatcher
    /// had no branch for it. Logged once per code.
    pub fn unimplemented(&mut self, event: &Event) {
        if self.seen_codes.insert(event.code()) {
            warn!(
                "Unimplemented event {} (code 0x{:04x}): {}",
                codes::name(event.code()),
                event.code(),
                event
            );
        }
    }

    /// How many times handler `id` went unhandled.
    pub fn unhandled_count(&self, id: HandlerId) -> u64 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn has_seen(&self, id: HandlerId) -> bool {
        self.seen_handlers.contains(&id)
    }

    pub fn has_seen_code(&self, code: EventCode) -> bool {
        self.seen_codes.contains(&code)
    }
}

impl Default for FallbackHandler {
    fn default() -> Self {
        Self::new(UnhandledEventPolicy::SILENT)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
