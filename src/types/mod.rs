//! Data types shared by the layout passes and the table view.

mod column;
mod measurements;
mod metrics;
mod position;

pub use column::*;
pub use measurements::*;
pub use metrics::*;
pub use position::*;
