//! Pure projections of the current sample into renderable artifacts. Each
//! projection reads the serialized sample plus its own parameters and never
//! touches the store or the sampler.

pub mod download;
pub mod plot;
pub mod table;

pub use download::build_download;
pub use plot::build_plot;
pub use table::build_table;
