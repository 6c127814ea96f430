pub mod advance;
pub mod attendance;
pub mod day_type;
pub mod employee;
pub mod payroll;
pub mod rate;
