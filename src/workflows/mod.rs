pub mod assessment;
pub mod wealth;
