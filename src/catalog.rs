//! Song catalog: the `Track` model and the one-shot loader that fetches the
//! playlist from the songs API.

mod fetch;
mod model;

pub use fetch::*;
pub use model::*;
