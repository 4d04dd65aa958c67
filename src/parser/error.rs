//! Error type definition.

use thiserror::Error;

/// Error type for parsing of HGVS substitution expressions.
#[derive(Error, Debug)]
pub enum Error {
    /// Token does not match the nucleotide substitution grammar.
    #[error("'{0}' contains invalid nucleotide HGVS syntax")]
    MalformedNucleotideVariant(String),
    /// Token does not match the protein substitution grammar.
    #[error("'{0}' contains invalid protein HGVS syntax")]
    MalformedProteinVariant(String),
    /// A nucleotide multi-variant string mixes prefix types.
    #[error("'{0}' contains variants with multiple prefix types")]
    MixedPrefix(String),
    /// A mixed variant token does not split into an `nt pro` pair.
    #[error("expected 'nt pro' pair but found '{0}'")]
    MalformedVariantPair(String),
    /// The string is neither nucleotide-only, protein-only, nor mixed.
    #[error("could not infer type of HGVS string from '{0}'")]
    UnclassifiableVariant(String),
}
