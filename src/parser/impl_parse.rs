//! Provide implementation of parsing to data structures.

use std::str::FromStr;

use nom::character::complete::{char, one_of};
use nom::combinator::{all_consuming, opt};
use nom::{IResult, Parser};

use crate::parser::ds::*;
use crate::parser::error::Error;
use crate::parser::parse_funcs::*;

impl NaSubstitution {
    pub fn parse(input: &str) -> IResult<&str, Self> {
        let (rest, (prefix, _, position, edit)) =
            (one_of("cgmn"), char('.'), num::position, na_sub::edit).parse(input)?;
        let prefix = match prefix {
            'c' => NaPrefix::Cds,
            'g' => NaPrefix::Genome,
            'm' => NaPrefix::Mito,
            _ => NaPrefix::Tx,
        };
        Ok((
            rest,
            Self {
                prefix,
                position,
                edit,
            },
        ))
    }
}

impl FromStr for NaSubstitution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(Self::parse)
            .parse(s)
            .map(|(_, event)| event)
            .map_err(|_| Error::MalformedNucleotideVariant(s.to_string()))
    }
}

impl ProteinSubstitution {
    pub fn parse(input: &str) -> IResult<&str, Self> {
        let (rest, _) = (char('p'), char('.')).parse(input)?;
        let (rest, ident) = opt(char('=')).parse(rest)?;
        if ident.is_some() {
            return Ok((rest, ProteinSubstitution::NoChange));
        }
        let (rest, (reference, position, edit)) =
            (protein::residue, num::position, protein_sub::edit).parse(rest)?;
        Ok((
            rest,
            ProteinSubstitution::Ordinary {
                reference,
                position,
                edit,
            },
        ))
    }
}

impl FromStr for ProteinSubstitution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(Self::parse)
            .parse(s)
            .map(|(_, event)| event)
            .map_err(|_| Error::MalformedProteinVariant(s.to_string()))
    }
}
