pub mod enrichment;
pub mod facets;
pub mod teacher;

pub use enrichment::*;
pub use facets::*;
pub use teacher::*;
