pub mod date;
pub mod money;
pub mod time;

pub use money::{fmt_peso, round2};
pub use time::format_minutes;
