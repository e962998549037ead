pub mod recruitment;
pub mod ticketing;
