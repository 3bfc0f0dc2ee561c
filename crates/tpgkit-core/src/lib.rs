//! # TPGKit Core
//!
//! Core types shared by tool path generators and their hosts:
//! the error taxonomy, length units, motion primitives and the
//! toolpath sink a generator appends to.

pub mod error;
pub mod toolpath;
pub mod units;

pub use error::{ConfigurationError, Result, ToolpathError, TpgError};
pub use toolpath::{MotionKind, MotionPrimitive, Toolpath, ToolpathSink};
pub use units::{format_length, parse_length, LengthUnit, MM_PER_INCH};
