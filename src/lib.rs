//! footprint-wizard: parametric PCB footprint generator
//!
//! Turns a package description (family, pitch, pad sizes, body and courtyard
//! dimensions) into the pads, pins, silkscreen and courtyard of a footprint
//! and writes it as an `Element[...]` footprint file.
//!
//! # Architecture
//!
//! - **Parameters**: one [`params::ParameterModel`] per request, read from a
//!   parameter file or the default library
//! - **Generation**: one generator per package family produces a
//!   [`geometry::Geometry`] in centimil
//! - **Design rules**: [`drc::check`] reports problems with the parameters
//!   as data; callers decide whether to write anyway
//! - **Output**: [`emitter`] serialises the geometry
//!
//! # Modules
//!
//! - [`catalog`]: Default footprint library
//! - [`config`]: Configuration loading and validation
//! - [`designator`]: Grid designators and pin exceptions
//! - [`drc`]: Design rule checks
//! - [`emitter`]: Footprint file output
//! - [`error`]: Error types
//! - [`geometry`]: Generated primitives
//! - [`packages`]: Per-family generators
//! - [`params`]: Parameter model and parameter files
//! - [`units`]: Document units

pub mod catalog;
pub mod config;
pub mod designator;
pub mod drc;
pub mod emitter;
pub mod error;
pub mod geometry;
pub mod packages;
pub mod params;
pub mod units;

pub use packages::generate;
