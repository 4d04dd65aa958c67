//! Conversion session tying the engine together.
//!
//! A [`Converter`] owns the wild-type sequence and the coordinate
//! configuration for one conversion run and exposes the per-row entry
//! points used by the surrounding pipeline: [`Converter::parse_row`] for
//! normalizing raw variant strings into `hgvs_nt`/`hgvs_pro` column values
//! and [`Converter::validate_row`] for reference-agreement checks.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::normalizer::{Diagnostics, SilentInferencer};
use crate::offset::apply_offset;
use crate::parser::{self, TokenClass};
use crate::sequence::WildTypeSequence;
use crate::validator::ReferenceValidator;

pub use self::error::Error;

mod error {
    /// Error type for the conversion session.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        #[error("coding offset must be a multiple of 3, but is: {0}")]
        OffsetNotCodonAligned(i32),
        #[error("parsing failed")]
        Parse(#[from] crate::parser::Error),
        #[error("sequence operation failed")]
        Sequence(#[from] crate::sequence::Error),
        #[error("offset application failed")]
        Offset(#[from] crate::offset::Error),
        #[error("normalization failed")]
        Normalization(#[from] crate::normalizer::Error),
        #[error("validation failed")]
        Validation(#[from] crate::validator::Error),
    }
}

/// The Enrich2 HDF5 element a row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    /// The synonymous-only element.
    Synonymous,
    /// The general variants element.
    Variants,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Synonymous => write!(f, "synonymous"),
            TableKind::Variants => write!(f, "variants"),
        }
    }
}

/// One raw input row: a variant string, optionally tagged with the element
/// it was read from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Row {
    SingleVariant(String),
    VariantWithElement(String, TableKind),
}

impl Row {
    pub fn variant(&self) -> &str {
        match self {
            Row::SingleVariant(variant) => variant,
            Row::VariantWithElement(variant, _) => variant,
        }
    }

    pub fn element(&self) -> Option<TableKind> {
        match self {
            Row::SingleVariant(_) => None,
            Row::VariantWithElement(_, element) => Some(*element),
        }
    }
}

/// Coordinate configuration of a conversion session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of wild-type bases clipped before the analyzed region.
    pub offset: i32,
    /// Whether input positions are 1-based relative to the wild-type
    /// sequence.
    pub one_based: bool,
    /// Whether the input uses coding HGVS syntax; coding offsets must be
    /// codon-aligned.
    pub is_coding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            offset: 0,
            one_based: true,
            is_coding: true,
        }
    }
}

/// The normalized output of one row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParsedRow {
    pub hgvs_nt: Option<String>,
    pub hgvs_pro: Option<String>,
    /// Non-fatal warnings collected while resolving the row.
    pub diagnostics: Diagnostics,
}

/// A conversion session over one wild-type sequence.
pub struct Converter {
    sequence: WildTypeSequence,
    config: Config,
}

impl Converter {
    /// Create a session for the given wild-type sequence.
    ///
    /// Fails with [`Error::OffsetNotCodonAligned`] when the data is
    /// declared coding but the offset is not a multiple of three.
    pub fn new(wt_sequence: &str, config: Config) -> Result<Self, Error> {
        if config.is_coding && config.offset % 3 != 0 {
            return Err(Error::OffsetNotCodonAligned(config.offset));
        }
        Ok(Self {
            sequence: WildTypeSequence::new(wt_sequence)?,
            config,
        })
    }

    pub fn sequence(&self) -> &WildTypeSequence {
        &self.sequence
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize one raw row into `hgvs_nt`/`hgvs_pro` column values.
    ///
    /// Sentinel rows bypass parsing: under the synonymous element they map
    /// to `(None, sentinel)`, otherwise to `(sentinel, sentinel)`.  All
    /// other rows have the coordinate offset applied, are classified as
    /// mixed, nucleotide-only, or protein-only, and are re-serialized in
    /// canonical form.
    pub fn parse_row(&self, row: &Row) -> Result<ParsedRow, Error> {
        let variant = row.variant().trim();
        debug!("parsing row variant '{}'", variant);

        if parser::is_special(variant) {
            let hgvs_nt = match row.element() {
                Some(TableKind::Synonymous) => None,
                _ => Some(variant.to_string()),
            };
            return Ok(ParsedRow {
                hgvs_nt,
                hgvs_pro: Some(variant.to_string()),
                diagnostics: Diagnostics::default(),
            });
        }

        let variant = apply_offset(variant, self.config.offset)?;
        match parser::classify(&variant)? {
            TokenClass::Mixed => self.parse_mixed_variant(&variant),
            TokenClass::NucleotideOnly => Ok(ParsedRow {
                hgvs_nt: Some(parser::parse_nucleotide_variant(&variant)?),
                hgvs_pro: None,
                diagnostics: Diagnostics::default(),
            }),
            TokenClass::ProteinOnly => Ok(ParsedRow {
                hgvs_nt: None,
                hgvs_pro: Some(parser::parse_protein_variant(&variant)?),
                diagnostics: Diagnostics::default(),
            }),
        }
    }

    /// Resolve a mixed `nt pro` row via codon-group silent inference.
    fn parse_mixed_variant(&self, variant: &str) -> Result<ParsedRow, Error> {
        let pairs = parser::split_pairs(variant)?;
        let inferencer = SilentInferencer::new(&self.sequence);
        let (nt_variants, pro_variants, diagnostics) = inferencer.resolve_mixed(&pairs, variant)?;
        for diagnostic in &diagnostics {
            warn!("{}", diagnostic);
        }
        Ok(ParsedRow {
            hgvs_nt: Some(parser::parse_nucleotide_tokens(&nt_variants)?),
            hgvs_pro: Some(parser::parse_protein_tokens(&pro_variants)?),
            diagnostics,
        })
    }

    /// Check a (possibly multi) variant string for reference agreement with
    /// the wild-type sequence, dispatching on the prefix type.
    pub fn validate_row(&self, variant: &str) -> Result<(), Error> {
        let variant = variant.trim();
        if parser::is_special(variant) {
            return Ok(());
        }
        let validator = ReferenceValidator::new(&self.sequence, self.config.one_based);
        if variant.starts_with('p') {
            validator.validate_protein(variant)?;
        } else {
            validator.validate_nucleotide(variant)?;
        }
        Ok(())
    }
}
