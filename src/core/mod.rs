pub mod advances;
pub mod autoclose;
pub mod backfill;
pub mod calculator;
pub mod calendar;
pub mod clock;
pub mod events;
pub mod guard;
pub mod payroll;
pub mod rates;
