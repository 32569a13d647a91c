//! paperframe — split files into self-describing barcode frames, lay the
//! rendered symbols out on printable pages, and reassemble the original
//! file from any complete collection of scanned frames, proving integrity
//! with a whole-file CRC-32.

pub mod consts;
pub mod error;

pub mod collect;
pub mod config;
pub mod frame;
pub mod layout;
pub mod naming;
pub mod reassemble;
pub mod scan;
pub mod split;
pub mod transport;
pub mod vision;

// Convenience re-exports
pub use config::PaperConfig;
pub use error::{Error, Result};
pub use frame::Frame;
pub use layout::PageGrid;
pub use reassemble::{reassemble, Reassembly, RecoveredFile};
pub use split::{split, RobustnessLevel};
