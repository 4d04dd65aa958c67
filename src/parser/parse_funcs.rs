//! Implementation of parser functions.

/// Code for parsing nucleotide bases.
pub mod na {
    use nom::character::complete::one_of;
    use nom::{IResult, Parser};

    /// Bases accepted in substitution events.
    pub static NA_BASES: &str = "ACGT";

    pub fn na(input: &str) -> IResult<&str, char> {
        one_of(NA_BASES).parse(input)
    }
}

/// Code for parsing amino acid residues.
pub mod protein {
    use nom::bytes::complete::take;
    use nom::{IResult, Parser};

    /// 1-letter amino acids including the terminal `*`.
    pub static AAT1: &str = "ACDEFGHIKLMNPQRSTVWYX*";

    /// 3-letter amino acids including the terminal `Ter`.
    pub const AAT3: &[&str] = &[
        "Ala", "Cys", "Asp", "Glu", "Phe", "Gly", "His", "Ile", "Lys", "Leu", "Met", "Asn", "Pro",
        "Gln", "Arg", "Ser", "Thr", "Val", "Trp", "Tyr", "Xaa", "Ter",
    ];

    pub fn aat1(input: &str) -> IResult<&str, &str> {
        let (rest, c) = take(1usize).parse(input)?;
        if !AAT1.contains(c) {
            Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Fail,
            )))
        } else {
            Ok((rest, c))
        }
    }

    pub fn aat3(input: &str) -> IResult<&str, &str> {
        let (rest, triplet) = take(3usize).parse(input)?;
        if !AAT3.contains(&triplet) {
            Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Fail,
            )))
        } else {
            Ok((rest, triplet))
        }
    }

    /// Parse a residue in either 3- or 1-letter form, canonicalized to the
    /// 3-letter code.
    pub fn residue(input: &str) -> IResult<&str, String> {
        if let Ok((rest, aa3)) = aat3(input) {
            return Ok((rest, aa3.to_string()));
        }
        let (rest, aa1) = aat1(input)?;
        match crate::sequence::aa1_to_aa3(aa1) {
            Ok(aa3) => Ok((rest, aa3)),
            Err(_) => Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Fail,
            ))),
        }
    }
}

/// Code for parsing positions.
pub mod num {
    use nom::character::complete::digit1;
    use nom::combinator::map_res;
    use nom::{IResult, Parser};

    pub fn position(input: &str) -> IResult<&str, u32> {
        map_res(digit1, str::parse::<u32>).parse(input)
    }
}

/// Code for parsing nucleotide substitution edits.
pub mod na_sub {
    use nom::branch::alt;
    use nom::character::complete::char as nom_char;
    use nom::combinator::opt;
    use nom::{IResult, Parser};

    use super::na::na;
    use crate::parser::ds::NaEdit;

    pub fn ident(input: &str) -> IResult<&str, NaEdit> {
        let (rest, (reference, _)) = (opt(na), nom_char('=')).parse(input)?;
        Ok((rest, NaEdit::Ident { reference }))
    }

    pub fn subst(input: &str) -> IResult<&str, NaEdit> {
        let (rest, (reference, _, alternative)) = (na, nom_char('>'), na).parse(input)?;
        Ok((
            rest,
            NaEdit::Subst {
                reference,
                alternative,
            },
        ))
    }

    pub fn edit(input: &str) -> IResult<&str, NaEdit> {
        alt((ident, subst)).parse(input)
    }
}

/// Code for parsing protein substitution edits.
pub mod protein_sub {
    use nom::branch::alt;
    use nom::character::complete::char as nom_char;
    use nom::{IResult, Parser};

    use super::protein::residue;
    use crate::parser::ds::ProteinEdit;

    pub fn ident(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, _) = nom_char('=').parse(input)?;
        Ok((rest, ProteinEdit::Ident))
    }

    pub fn subst(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, alternative) = residue(input)?;
        Ok((rest, ProteinEdit::Subst { alternative }))
    }

    pub fn edit(input: &str) -> IResult<&str, ProteinEdit> {
        alt((ident, subst)).parse(input)
    }
}
