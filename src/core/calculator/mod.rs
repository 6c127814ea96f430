//! Hours & pay calculator.
//!
//! Pure: (time-in, time-out, rate, close method) → classified day with
//! a cached pay breakdown. The caller resolves the salary rate first;
//! nothing in here touches the store.

pub mod classify;
pub mod lunch;

pub use classify::{DayCalculation, calculate};
pub use lunch::lunch_overlap_minutes;
