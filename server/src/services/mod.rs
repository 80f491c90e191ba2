pub mod conflicts;
pub mod policy;
pub mod queries;
pub mod validation;
