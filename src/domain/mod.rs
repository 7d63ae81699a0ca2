pub mod district;
pub mod vehicle;
