pub mod advances;
pub mod attendance;
pub mod employees;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod payroll;
pub mod pool;
pub mod rates;
