//! Validation of substitution variants against the wild-type sequence.

mod error;

pub use crate::validator::error::Error;

use crate::parser::{
    is_multi, is_special, split_variant, NaSubstitution, ProteinSubstitution,
};
use crate::sequence::{aa1_to_aa3, WildTypeSequence};

/// Checks that the claimed reference base or residue of a substitution
/// variant matches the wild-type sequence at the (index-adjusted)
/// position.
///
/// Multi-variant strings are validated part by part; sentinels and silent
/// events are always valid.
pub struct ReferenceValidator<'a> {
    sequence: &'a WildTypeSequence,
    one_based: bool,
}

impl<'a> ReferenceValidator<'a> {
    pub fn new(sequence: &'a WildTypeSequence, one_based: bool) -> Self {
        Self {
            sequence,
            one_based,
        }
    }

    /// The zero-based index for a 1- or 0-based event position.
    fn index(&self, position: u32) -> i64 {
        i64::from(position) - i64::from(self.one_based)
    }

    /// Validate a nucleotide substitution variant (possibly multi) against
    /// the wild-type sequence.
    pub fn validate_nucleotide(&self, variant: &str) -> Result<(), Error> {
        if is_multi(variant) {
            for part in split_variant(variant) {
                self.validate_nucleotide(&part)?;
            }
            return Ok(());
        }

        let variant = variant.trim();
        if is_special(variant) {
            return Ok(());
        }

        let event: NaSubstitution = variant.parse()?;
        if event.silent() {
            return Ok(());
        }

        let index = self.index(event.position);
        if index < 0 {
            return Err(Error::NegativeIndex {
                variant: variant.to_string(),
                one_based: self.one_based,
            });
        }
        if index as usize >= self.sequence.len() {
            return Err(Error::OutOfBounds {
                variant: variant.to_string(),
                position: index + i64::from(self.one_based),
                index,
                max_index: self.sequence.len().saturating_sub(1),
                length: self.sequence.len(),
            });
        }

        let expected = self.sequence.sequence().as_bytes()[index as usize] as char;
        match event.reference() {
            Some(claimed) if claimed != expected => Err(Error::ReferenceMismatch {
                variant: variant.to_string(),
                position: index + 1,
                expected,
                claimed,
            }),
            _ => Ok(()),
        }
    }

    /// Validate a protein substitution variant (possibly multi) against the
    /// translated wild-type sequence.
    pub fn validate_protein(&self, variant: &str) -> Result<(), Error> {
        if is_multi(variant) {
            for part in split_variant(variant) {
                self.validate_protein(&part)?;
            }
            return Ok(());
        }

        let variant = variant.trim();
        if is_special(variant) || variant.contains("p.=") {
            return Ok(());
        }

        let event: ProteinSubstitution = variant.parse()?;
        let Some(position) = event.position() else {
            return Ok(());
        };

        let index = self.index(position);
        if index < 0 {
            return Err(Error::NegativeIndex {
                variant: variant.to_string(),
                one_based: self.one_based,
            });
        }
        if index as usize >= self.sequence.protein().len() {
            return Err(Error::OutOfBounds {
                variant: variant.to_string(),
                position: index + i64::from(self.one_based),
                index,
                max_index: self.sequence.protein().len().saturating_sub(1),
                length: self.sequence.protein().len(),
            });
        }

        let aa1 = self.sequence.protein().as_bytes()[index as usize] as char;
        let expected = aa1_to_aa3(&aa1.to_string())?;
        match event.reference() {
            Some(claimed) if claimed != expected => Err(Error::ResidueMismatch {
                variant: variant.to_string(),
                position: index + 1,
                expected,
                claimed: claimed.to_string(),
            }),
            _ => Ok(()),
        }
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
