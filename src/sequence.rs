//! Wild-type sequence model and codon translation tables.
//!
//! A [`WildTypeSequence`] owns the nucleotide sequence that a conversion
//! session validates variants against, together with its derived codon
//! decomposition and translated protein sequence.

use regex::Regex;
use rustc_hash::FxHashMap;

pub use crate::sequence::error::Error;

mod error {
    /// Error type for sequence construction and translation.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        #[error("{0} is not a valid DNA sequence")]
        InvalidSequence(String),
        #[error("codon is undefined in codon table: {0}")]
        UndefinedCodon(String),
        #[error("invalid 1-letter amino acid: {0}")]
        InvalidOneLetterAminoAcid(String),
        #[error("invalid 3-letter amino acid: {0}")]
        InvalidThreeLetterAminoAcid(String),
        #[error("3-letter amino acid sequence length is not multiple of three: {0}")]
        InvalidThreeLetterAminoAcidLength(usize),
        #[error("can only translate DNA sequences whose length is multiple of 3, but is: {0}")]
        UntranslatableDnaLength(usize),
    }
}

lazy_static::lazy_static! {
    /// Accepted wild-type nucleotide alphabet (after upper-casing).
    static ref DNA_RE: Regex = Regex::new(r"^[ACGT]+$").expect("invalid regex");
}

lazy_static::lazy_static! {
    static ref AA3_TO_AA1_VEC: Vec<(&'static str, char)> = vec![
        ("Ala", 'A'),
        ("Arg", 'R'),
        ("Asn", 'N'),
        ("Asp", 'D'),
        ("Cys", 'C'),
        ("Gln", 'Q'),
        ("Glu", 'E'),
        ("Gly", 'G'),
        ("His", 'H'),
        ("Ile", 'I'),
        ("Leu", 'L'),
        ("Lys", 'K'),
        ("Met", 'M'),
        ("Phe", 'F'),
        ("Pro", 'P'),
        ("Ser", 'S'),
        ("Thr", 'T'),
        ("Trp", 'W'),
        ("Tyr", 'Y'),
        ("Val", 'V'),
        ("Xaa", 'X'),
        ("Ter", '*'),
    ];

    static ref AA1_TO_AA3: FxHashMap<char, &'static str> = {
        let mut m = FxHashMap::default();
        for (aa3, aa1) in AA3_TO_AA1_VEC.iter() {
            m.insert(*aa1, *aa3);
        }
        m
    };

    static ref AA3_TO_AA1: FxHashMap<&'static str, char> = {
        let mut m = FxHashMap::default();
        for (aa3, aa1) in AA3_TO_AA1_VEC.iter() {
            m.insert(*aa3, *aa1);
        }
        m
    };

    /// NCBI standard translation table.
    static ref DNA_TO_AA1: FxHashMap<&'static str, char> = {
        let codons = [
            ("AAA", 'K'),
            ("AAC", 'N'),
            ("AAG", 'K'),
            ("AAT", 'N'),
            ("ACA", 'T'),
            ("ACC", 'T'),
            ("ACG", 'T'),
            ("ACT", 'T'),
            ("AGA", 'R'),
            ("AGC", 'S'),
            ("AGG", 'R'),
            ("AGT", 'S'),
            ("ATA", 'I'),
            ("ATC", 'I'),
            ("ATG", 'M'),
            ("ATT", 'I'),
            ("CAA", 'Q'),
            ("CAC", 'H'),
            ("CAG", 'Q'),
            ("CAT", 'H'),
            ("CCA", 'P'),
            ("CCC", 'P'),
            ("CCG", 'P'),
            ("CCT", 'P'),
            ("CGA", 'R'),
            ("CGC", 'R'),
            ("CGG", 'R'),
            ("CGT", 'R'),
            ("CTA", 'L'),
            ("CTC", 'L'),
            ("CTG", 'L'),
            ("CTT", 'L'),
            ("GAA", 'E'),
            ("GAC", 'D'),
            ("GAG", 'E'),
            ("GAT", 'D'),
            ("GCA", 'A'),
            ("GCC", 'A'),
            ("GCG", 'A'),
            ("GCT", 'A'),
            ("GGA", 'G'),
            ("GGC", 'G'),
            ("GGG", 'G'),
            ("GGT", 'G'),
            ("GTA", 'V'),
            ("GTC", 'V'),
            ("GTG", 'V'),
            ("GTT", 'V'),
            ("TAA", '*'),
            ("TAC", 'Y'),
            ("TAG", '*'),
            ("TAT", 'Y'),
            ("TCA", 'S'),
            ("TCC", 'S'),
            ("TCG", 'S'),
            ("TCT", 'S'),
            ("TGA", '*'),
            ("TGC", 'C'),
            ("TGG", 'W'),
            ("TGT", 'C'),
            ("TTA", 'L'),
            ("TTC", 'F'),
            ("TTG", 'L'),
            ("TTT", 'F'),
        ];
        let mut m = FxHashMap::default();
        for (codon, aa1) in codons {
            m.insert(codon, aa1);
        }
        m
    };
}

/// Translates a single codon to its 1-letter amino acid.
///
/// The codon is upper-cased before lookup.  Fails with
/// [`Error::UndefinedCodon`] for anything that is not a full triplet of
/// standard bases, including the partial codon at the end of a sequence
/// whose length is not a multiple of three.
pub fn translate_codon(codon: &str) -> Result<char, Error> {
    let upper = codon.to_uppercase();
    DNA_TO_AA1
        .get(upper.as_str())
        .copied()
        .ok_or_else(|| Error::UndefinedCodon(codon.to_string()))
}

/// Translates a DNA sequence into a single-letter amino acid sequence.
///
/// # Args
///
/// * `seq` -- A nucleotide sequence.
/// * `full_codons` -- If `true`, forces sequence to have length that is a
///   multiple of 3 and returns an `Err` otherwise.  If `false`, `ter_symbol`
///   is added as the last amino acid in place of the trailing partial codon.
/// * `ter_symbol` -- Placeholder for the last amino acid if sequence length
///   is not divisible by three and `full_codons` is `false`.
///
/// # Returns
///
/// The corresponding single letter amino acid sequence.
pub fn translate_cds(seq: &str, full_codons: bool, ter_symbol: &str) -> Result<String, Error> {
    if seq.is_empty() {
        return Ok("".to_string());
    }

    if full_codons && seq.len() % 3 != 0 {
        return Err(Error::UntranslatableDnaLength(seq.len()));
    }

    let mut result = String::with_capacity(seq.len() / 3 + 1);
    for chunk in seq.as_bytes().chunks_exact(3) {
        let codon = std::str::from_utf8(chunk)
            .map_err(|_| Error::UndefinedCodon(String::from_utf8_lossy(chunk).into_owned()))?;
        result.push(translate_codon(codon)?);
    }

    if !full_codons && seq.len() % 3 != 0 {
        result.push_str(ter_symbol);
    }

    Ok(result)
}

/// Converts a string of 1-letter amino acids to 3-letter amino acids.
///
/// Fails if the sequence is not of 1-letter amino acids.
pub fn aa1_to_aa3(seq: &str) -> Result<String, Error> {
    let mut result = String::with_capacity(seq.len() * 3);
    for aa1 in seq.chars() {
        let aa3 = AA1_TO_AA3
            .get(&aa1)
            .ok_or_else(|| Error::InvalidOneLetterAminoAcid(aa1.to_string()))?;
        result.push_str(aa3);
    }
    Ok(result)
}

/// Converts a string of 3-letter amino acids to 1-letter amino acids.
///
/// Fails if the sequence is not of 3-letter amino acids.
pub fn aa3_to_aa1(seq: &str) -> Result<String, Error> {
    if seq.len() % 3 != 0 {
        return Err(Error::InvalidThreeLetterAminoAcidLength(seq.len()));
    }

    let mut result = String::with_capacity(seq.len() / 3);
    for chunk in seq.as_bytes().chunks(3) {
        let aa3 = std::str::from_utf8(chunk)
            .map_err(|_| Error::InvalidThreeLetterAminoAcid(String::from_utf8_lossy(chunk).into_owned()))?;
        let aa1 = AA3_TO_AA1
            .get(aa3)
            .ok_or_else(|| Error::InvalidThreeLetterAminoAcid(aa3.to_string()))?;
        result.push(*aa1);
    }
    Ok(result)
}

/// Placeholder residue used when the wild-type sequence ends in a partial
/// codon.  Keeps the protein sequence the same length as the codon list.
const PARTIAL_CODON_PLACEHOLDER: &str = "X";

/// A wild-type nucleotide sequence with derived codon decomposition and
/// translated protein sequence.
///
/// Constructed once per conversion session and immutable afterwards;
/// re-setting the sequence recomputes both derived fields, there is no
/// partial-update path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WildTypeSequence {
    sequence: String,
    codons: Vec<String>,
    protein: String,
}

impl WildTypeSequence {
    /// Construct from a raw nucleotide string.
    ///
    /// The sequence is upper-cased and validated against the accepted
    /// alphabet; fails with [`Error::InvalidSequence`] otherwise.  Any
    /// length is accepted -- a trailing partial codon is kept in the codon
    /// list and translated to `X`.
    pub fn new(seq: &str) -> Result<Self, Error> {
        let mut result = Self {
            sequence: String::new(),
            codons: Vec::new(),
            protein: String::new(),
        };
        result.set_sequence(seq)?;
        Ok(result)
    }

    /// Replace the sequence, recomputing the codon list and the protein
    /// translation.
    pub fn set_sequence(&mut self, seq: &str) -> Result<(), Error> {
        let seq = seq.to_uppercase();
        if !DNA_RE.is_match(&seq) {
            return Err(Error::InvalidSequence(seq));
        }
        self.protein = translate_cds(&seq, false, PARTIAL_CODON_PLACEHOLDER)?;
        self.codons = seq
            .as_bytes()
            .chunks(3)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();
        self.sequence = seq;
        Ok(())
    }

    /// The upper-cased nucleotide sequence.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Non-overlapping triplet slices of the sequence; the last codon may
    /// be partial.
    pub fn codons(&self) -> &[String] {
        &self.codons
    }

    /// The translated protein sequence as 1-letter amino acids; same length
    /// as the codon list.
    pub fn protein(&self) -> &str {
        &self.protein
    }

    /// Number of bases in the sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The base at the given 1-based position, if in bounds.
    pub fn base(&self, position: u32) -> Option<char> {
        if position == 0 {
            return None;
        }
        self.sequence.as_bytes().get(position as usize - 1).map(|b| *b as char)
    }

    /// The codon at the given 1-based codon position, if in bounds.
    pub fn codon(&self, codon_position: u32) -> Option<&str> {
        if codon_position == 0 {
            return None;
        }
        self.codons.get(codon_position as usize - 1).map(String::as_str)
    }

    /// The translated residue at the given 1-based residue position, if in
    /// bounds.
    pub fn residue(&self, position: u32) -> Option<char> {
        if position == 0 {
            return None;
        }
        self.protein.as_bytes().get(position as usize - 1).map(|b| *b as char)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn codon_translation() -> Result<(), Error> {
        assert_eq!(translate_codon("ATG")?, 'M');
        assert_eq!(translate_codon("atg")?, 'M');
        assert_eq!(translate_codon("TAA")?, '*');
        assert!(matches!(
            translate_codon("AT"),
            Err(Error::UndefinedCodon(_))
        ));
        assert!(matches!(
            translate_codon("NNN"),
            Err(Error::UndefinedCodon(_))
        ));
        Ok(())
    }

    #[test]
    fn cds_translation() -> Result<(), Error> {
        assert_eq!(translate_cds("", true, "*")?, "");
        assert_eq!(translate_cds("ATGAAACTG", true, "*")?, "MKL");
        assert_eq!(translate_cds("ATGAAACT", false, "X")?, "MKX");
        assert!(matches!(
            translate_cds("ATGAAACT", true, "*"),
            Err(Error::UntranslatableDnaLength(8))
        ));
        Ok(())
    }

    #[test]
    fn aa_conversion() -> Result<(), Error> {
        assert_eq!(aa1_to_aa3("KR*")?, "LysArgTer");
        assert_eq!(aa3_to_aa1("LysArgTer")?, "KR*");
        assert!(matches!(
            aa1_to_aa3("O"),
            Err(Error::InvalidOneLetterAminoAcid(_))
        ));
        assert!(matches!(
            aa3_to_aa1("Lys_"),
            Err(Error::InvalidThreeLetterAminoAcidLength(4))
        ));
        assert!(matches!(
            aa3_to_aa1("Foo"),
            Err(Error::InvalidThreeLetterAminoAcid(_))
        ));
        Ok(())
    }

    #[test]
    fn construction() -> Result<(), Error> {
        let seq = WildTypeSequence::new("atgaaactg")?;
        assert_eq!(seq.sequence(), "ATGAAACTG");
        assert_eq!(seq.codons(), &["ATG", "AAA", "CTG"]);
        assert_eq!(seq.protein(), "MKL");
        Ok(())
    }

    #[test]
    fn construction_rejects_invalid_alphabet() {
        assert!(matches!(
            WildTypeSequence::new("ATGXXX"),
            Err(Error::InvalidSequence(_))
        ));
        assert!(matches!(
            WildTypeSequence::new(""),
            Err(Error::InvalidSequence(_))
        ));
    }

    #[test]
    fn length_invariants() -> Result<(), Error> {
        for (raw, len) in [("A", 1), ("AT", 1), ("ATG", 1), ("ATGA", 2), ("ATGAAACT", 3)] {
            let seq = WildTypeSequence::new(raw)?;
            assert_eq!(seq.codons().len(), len, "codons of {raw}");
            assert_eq!(seq.protein().len(), len, "protein of {raw}");
            assert_eq!(seq.codons().len(), raw.len().div_ceil(3));
        }
        Ok(())
    }

    #[test]
    fn partial_codon_translates_to_placeholder() -> Result<(), Error> {
        let seq = WildTypeSequence::new("ATGAA")?;
        assert_eq!(seq.codons(), &["ATG", "AA"]);
        assert_eq!(seq.protein(), "MX");
        Ok(())
    }

    #[test]
    fn reset_recomputes_derived_fields() -> Result<(), Error> {
        let mut seq = WildTypeSequence::new("ATGAAACTG")?;
        seq.set_sequence("tgg")?;
        assert_eq!(seq.sequence(), "TGG");
        assert_eq!(seq.codons(), &["TGG"]);
        assert_eq!(seq.protein(), "W");
        Ok(())
    }

    #[test]
    fn one_based_accessors() -> Result<(), Error> {
        let seq = WildTypeSequence::new("ATGAAACTG")?;
        assert_eq!(seq.base(0), None);
        assert_eq!(seq.base(1), Some('A'));
        assert_eq!(seq.base(4), Some('A'));
        assert_eq!(seq.base(10), None);
        assert_eq!(seq.codon(2), Some("AAA"));
        assert_eq!(seq.codon(4), None);
        assert_eq!(seq.residue(3), Some('L'));
        assert_eq!(seq.residue(4), None);
        Ok(())
    }
}

// <LICENSE>
// Copyright 2023 mave-hgvs Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
// </LICENSE>
