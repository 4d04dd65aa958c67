//! Parsing and formatting of HGVS substitution variant strings.
//!
//! The grammar covers the substitution subset of HGVS only: single-base
//! nucleotide events such as `c.4A>G` and single-residue protein events
//! such as `p.Lys4Arg`, plus the silent forms `c.4=`, `p.Lys4=`, and the
//! bare `p.=` marker.  Multi-event strings use the bracket convention
//! (`c.[4A>G;9C>T]`) with the shared prefix outside the bracket.

mod display;
mod ds;
mod error;
mod impl_parse;
mod parse_funcs;
mod tokens;

pub use crate::parser::display::*;
pub use crate::parser::ds::*;
pub use crate::parser::error::Error;
pub use crate::parser::tokens::*;
