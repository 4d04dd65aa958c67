//! Coordinate offset handling for substitution events.
//!
//! An offset of `o` bases clips the leading `o` bases of the wild-type
//! sequence; nucleotide positions shift by `o` directly while protein
//! positions shift by whole codons (`o / 3`, truncated toward zero).
//! One-based/zero-based conversion is not a concern here; it is applied by
//! the reference validator.

use crate::parser::{self, NaSubstitution, ProteinSubstitution};

pub use self::error::Error;

mod error {
    /// Error type for offset application.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        #[error("position after offset {offset} applied to {variant} is not positive")]
        NegativeCoordinate { variant: String, offset: i32 },
        #[error("parsing failed")]
        Parse(#[from] crate::parser::Error),
    }
}

/// The codon-scaled offset applied to protein positions: truncating
/// division by three, sign preserved.
pub fn protein_offset(offset: i32) -> i32 {
    offset.signum() * (offset.abs() / 3)
}

/// Shift a nucleotide event by `offset` bases.
pub fn offset_nucleotide(event: &NaSubstitution, offset: i32) -> Result<NaSubstitution, Error> {
    let position = i64::from(event.position) - i64::from(offset);
    if position < 1 {
        return Err(Error::NegativeCoordinate {
            variant: event.to_string(),
            offset,
        });
    }
    Ok(event.with_position(position as u32))
}

/// Shift a protein event by the codon-scaled offset.  The positionless
/// `p.=` form passes through untouched.
pub fn offset_protein(event: &ProteinSubstitution, offset: i32) -> Result<ProteinSubstitution, Error> {
    match event.position() {
        None => Ok(event.clone()),
        Some(pos) => {
            let adjusted = protein_offset(offset);
            let position = i64::from(pos) - i64::from(adjusted);
            if position < 1 {
                return Err(Error::NegativeCoordinate {
                    variant: event.to_string(),
                    offset: adjusted,
                });
            }
            Ok(event.with_position(position as u32))
        }
    }
}

/// Apply a coordinate offset to every event of a raw comma-delimited
/// variant string, re-serializing it in canonical form.
///
/// Each comma segment is either an `nt pro` dual token (single embedded
/// space, protein half optionally parenthesized), a bare protein token
/// (first character `p`), or a bare nucleotide token.
pub fn apply_offset(variant: &str, offset: i32) -> Result<String, Error> {
    let mut segments = Vec::new();
    for token in variant.split(',') {
        let token = token.trim();
        let parts: Vec<&str> = token.split(' ').collect();
        let (nt, pro) = if parts.len() == 2 {
            (Some(parts[0]), Some(parts[1]))
        } else if token.starts_with('p') {
            (None, Some(token))
        } else {
            (Some(token), None)
        };

        let nt = match nt {
            None => None,
            Some(nt) => {
                let event: NaSubstitution = nt.parse().map_err(Error::Parse)?;
                Some(offset_nucleotide(&event, offset)?.to_string())
            }
        };
        let pro = match pro {
            None => None,
            Some(pro) => {
                let stripped = parser::strip_parens(pro);
                let use_brackets = stripped.len() != pro.len();
                let event: ProteinSubstitution = stripped.parse().map_err(Error::Parse)?;
                let formatted = offset_protein(&event, offset)?.to_string();
                Some(if use_brackets {
                    format!("({})", formatted)
                } else {
                    formatted
                })
            }
        };

        let segment = match (nt, pro) {
            (Some(nt), Some(pro)) => format!("{} {}", nt, pro),
            (Some(nt), None) => nt,
            (None, Some(pro)) => pro,
            (None, None) => String::new(),
        };
        segments.push(segment);
    }
    Ok(segments.join(", "))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn protein_offset_scaling() {
        assert_eq!(protein_offset(0), 0);
        assert_eq!(protein_offset(6), 2);
        assert_eq!(protein_offset(7), 2);
        assert_eq!(protein_offset(-6), -2);
        assert_eq!(protein_offset(-7), -2);
    }

    #[test]
    fn nucleotide_offsetting() -> Result<(), Error> {
        let event: NaSubstitution = "c.7A>G".parse().map_err(Error::Parse)?;
        assert_eq!(offset_nucleotide(&event, 3)?.to_string(), "c.4A>G");
        assert_eq!(offset_nucleotide(&event, -3)?.to_string(), "c.10A>G");
        assert_eq!(offset_nucleotide(&event, 6)?.to_string(), "c.1A>G");
        assert!(matches!(
            offset_nucleotide(&event, 7),
            Err(Error::NegativeCoordinate { .. })
        ));
        Ok(())
    }

    #[test]
    fn protein_offsetting() -> Result<(), Error> {
        let event: ProteinSubstitution = "p.Lys10Arg".parse().map_err(Error::Parse)?;
        assert_eq!(offset_protein(&event, 6)?.to_string(), "p.Lys8Arg");
        // Negative offsets shift downstream: -6 bases is -2 codons.
        assert_eq!(offset_protein(&event, -6)?.to_string(), "p.Lys12Arg");
        assert!(matches!(
            offset_protein(&event, 30),
            Err(Error::NegativeCoordinate { .. })
        ));

        let no_change = ProteinSubstitution::NoChange;
        assert_eq!(offset_protein(&no_change, 30)?, ProteinSubstitution::NoChange);
        Ok(())
    }

    #[test]
    fn apply_offset_to_mixed_string() -> Result<(), Error> {
        assert_eq!(
            apply_offset("c.7A>G (p.Lys3=), c.9C>T (p.=)", 3)?,
            "c.4A>G (p.Lys2=), c.6C>T (p.=)"
        );
        assert_eq!(apply_offset("c.4A>G", 0)?, "c.4A>G");
        assert_eq!(apply_offset("p.Lys10Arg", -6)?, "p.Lys12Arg");
        assert_eq!(apply_offset("c.10A>G (p.Lys4=)", 0)?, "c.10A>G (p.Lys4=)");
        assert!(matches!(
            apply_offset("c.2A>G", 6),
            Err(Error::NegativeCoordinate { .. })
        ));
        assert!(matches!(
            apply_offset("_wt", 0),
            Err(Error::Parse(_))
        ));
        Ok(())
    }
}
