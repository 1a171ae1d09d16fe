pub mod datatypes;
pub mod error;
pub mod mesher;
pub mod standoff;
pub mod writer;
