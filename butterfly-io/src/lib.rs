//! Persistence for `butterfly-routing` types: the stop/route JSON network
//! format (§6) and a binary snapshot format for preprocessed Contraction
//! Hierarchies.

pub mod ch_snapshot;
pub mod error;
pub mod json;

pub use ch_snapshot::{load_ch_snapshot, save_ch_snapshot};
pub use error::{IoError, Result};
pub use json::{load_network, save_network};
