//! Prize Settlement Engine
//!
//! Computes tournament payouts from a fee schedule and the entrants' final
//! chip counts. A fixed stake pool goes to the top three finishers, the rest of
//! the pool is split in proportion to chips, every share is rounded to whole
//! hundreds, and the rounding residue is folded into the leader so the payouts
//! add up to the pool exactly.
//!
//! The pipeline is pure: resolve the schedule, compute the pool, allocate
//! stakes and chip shares, reconcile.

pub mod chips;
pub mod config;
pub mod engine;
pub mod error;
pub mod fee_schedule;
pub mod pool;
pub mod reconciler;
pub mod rounding;
pub mod stakes;
pub mod types;

pub use chips::{ChipWeightedAllocator, TieBreak};
pub use config::SettlementConfig;
pub use engine::{settle, validate_entrants, SettlementEngine};
pub use error::{Result, SettlementError};
pub use fee_schedule::{FeeOverrides, FeeScheduleResolver, FeeScheduleSource, FeeScheduleTable};
pub use pool::PoolCalculator;
pub use reconciler::Reconciler;
pub use rounding::{Rounder, RoundingPolicy};
pub use stakes::StakeAllocator;

// Re-export commonly used types
pub use types::*;
