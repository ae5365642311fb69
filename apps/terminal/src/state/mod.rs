//! # State Module
//!
//! Application state of one terminal session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Session                                  │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────────────────┐   ┌───────────────────────────┐  │   │
//! │  │  │   PosState (core)        │   │   ConfigState             │  │   │
//! │  │  │                          │   │                           │  │   │
//! │  │  │  inventory, cart,        │   │  store_name, currency,    │  │   │
//! │  │  │  bill slot, section,     │   │  low-stock threshold,     │  │   │
//! │  │  │  search query            │   │  invoice dir              │  │   │
//! │  │  └──────────────────────────┘   └───────────────────────────┘  │   │
//! │  │        mutated by actions             read-only                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Single-threaded: commands run one at a time, no locks needed.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{vars, ConfigError, ConfigState};

use stockdesk_core::{Action, CoreResult, Event, PosState};

/// Everything a command handler can touch.
#[derive(Debug, Clone)]
pub struct Session {
    pos: PosState,
    config: ConfigState,
}

impl Session {
    /// Starts a session, seeded with the demo items when the config asks for it.
    pub fn new(config: ConfigState) -> Self {
        let pos = if config.seed {
            PosState::seeded()
        } else {
            PosState::new()
        };
        Session { pos, config }
    }

    pub fn pos(&self) -> &PosState {
        &self.pos
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    /// Applies one action to the point-of-sale state.
    pub fn apply(&mut self, action: Action) -> CoreResult<Event> {
        self.pos.apply(action)
    }
}
