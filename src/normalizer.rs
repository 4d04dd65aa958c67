//! Codon-group resolution and silent substitution inference.
//!
//! Enrich2 emits `p.=` for silent protein changes, while the target
//! notation wants the positioned form `p.<Aa><pos>=`.  Given the
//! nucleotide events of one codon and the wild-type sequence, the correct
//! silent syntax is inferred from the codon table.

use std::fmt::Display;

use indexmap::IndexMap;
use serde::Serialize;

use crate::parser::{NaEdit, NaSubstitution};
use crate::sequence::{aa1_to_aa3, translate_codon, WildTypeSequence};

pub use self::error::Error;

mod error {
    /// Error type for codon-group resolution.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        #[error("codon group '{0}' contains variants from different codons")]
        MultiCodonGroup(String),
        #[error(
            "coordinate {position} (1-based) is out of bounds in {variant}; the wild-type \
            sequence has length {length}"
        )]
        OutOfBounds {
            variant: String,
            position: u32,
            length: usize,
        },
        #[error(
            "base '{expected}' at position {position} (1-based) in the wild-type sequence does \
            not match the base suggested by variant '{variant}' in row '{row}'"
        )]
        ReferenceMismatch {
            variant: String,
            row: String,
            position: u32,
            expected: char,
        },
        #[error(
            "wild-type codon ({wt_codon}, {wt_aa}) is not synonymous with the mutant codon \
            ({mut_codon}, {mut_aa}) suggested by the codon group '{group}'"
        )]
        SynonymyViolation {
            wt_codon: String,
            wt_aa: String,
            mut_codon: String,
            mut_aa: String,
            group: String,
        },
        #[error("parsing failed")]
        Parse(#[from] crate::parser::Error),
        #[error("sequence operation failed")]
        Sequence(#[from] crate::sequence::Error),
    }
}

/// Warning emitted during codon-group resolution.
///
/// Warnings are collected and handed back to the caller rather than pushed
/// into process-wide logging state; the session layer mirrors them through
/// `log::warn!`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// A codon group mixes events claiming silence with explicit events.
    PartiallySynonymous { group: String, variant: String },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::PartiallySynonymous { group, variant } => write!(
                f,
                "codon group '{}' from variant '{}' is partially synonymous",
                group, variant
            ),
        }
    }
}

/// Collected warnings from one resolution call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Infers positioned silent protein notation for codon groups against a
/// wild-type sequence.
pub struct SilentInferencer<'a> {
    sequence: &'a WildTypeSequence,
}

impl<'a> SilentInferencer<'a> {
    pub fn new(sequence: &'a WildTypeSequence) -> Self {
        Self { sequence }
    }

    /// Infer the correct silent protein substitution syntax for a group of
    /// nucleotide events belonging to one codon.
    ///
    /// Silent events have their bases replaced by the wild-type base at
    /// their position, which both validates and normalizes them; explicit
    /// events must agree with the wild-type reference.  The mutant codon
    /// rebuilt from the group must translate to the same residue as the
    /// wild-type codon.  `original` is the raw row, used in error messages.
    ///
    /// Returns `p.<Aa3><codonPos>=` built from the wild-type translation.
    pub fn infer_silent_substitution(
        &self,
        group: &[NaSubstitution],
        original: &str,
    ) -> Result<String, Error> {
        let mut events = group.to_vec();
        events.sort_by_key(|event| event.position);
        let group_rep = events
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let aa_position = match events.first() {
            Some(first) => first.codon_position(),
            None => return Err(Error::MultiCodonGroup(group_rep)),
        };
        if events.iter().any(|event| event.codon_position() != aa_position) {
            return Err(Error::MultiCodonGroup(group_rep));
        }

        for event in events.iter_mut() {
            let base = self
                .sequence
                .base(event.position)
                .ok_or_else(|| Error::OutOfBounds {
                    variant: event.to_string(),
                    position: event.position,
                    length: self.sequence.len(),
                })?;
            if event.silent() {
                *event = event.with_edit(NaEdit::Subst {
                    reference: base,
                    alternative: base,
                });
            } else if event.reference() != Some(base) {
                return Err(Error::ReferenceMismatch {
                    variant: event.to_string(),
                    row: original.to_string(),
                    position: event.position,
                    expected: base,
                });
            }
        }

        let wt_codon = self
            .sequence
            .codon(aa_position)
            .ok_or_else(|| Error::OutOfBounds {
                variant: group_rep.clone(),
                position: events[0].position,
                length: self.sequence.len(),
            })?
            .to_string();
        let mut mut_codon = wt_codon.clone();
        for event in &events {
            if let Some(alternative) = event.alternative() {
                let index = event.codon_frame() as usize - 1;
                mut_codon.replace_range(index..index + 1, &alternative.to_string());
            }
        }

        let wt_aa = translate_codon(&wt_codon)?;
        let mut_aa = translate_codon(&mut_codon)?;
        if wt_aa != mut_aa {
            return Err(Error::SynonymyViolation {
                wt_codon,
                wt_aa: aa1_to_aa3(&wt_aa.to_string())?,
                mut_codon,
                mut_aa: aa1_to_aa3(&mut_aa.to_string())?,
                group: group_rep,
            });
        }
        Ok(format!("p.{}{}=", aa1_to_aa3(&wt_aa.to_string())?, aa_position))
    }

    /// Resolve the `(nt, pro)` token pairs of one mixed variant row.
    ///
    /// Pairs are partitioned by the codon position of their nucleotide
    /// event; groups may appear non-contiguously in the input.  Within each
    /// group, pairs whose protein half carries the bare `p.=` marker form
    /// the "claims silent" sub-group and get the inferred positioned
    /// notation; explicit pairs are kept as-is.  Output order follows the
    /// input token order, not group order.
    pub fn resolve_mixed(
        &self,
        pairs: &[(String, String)],
        original: &str,
    ) -> Result<(Vec<String>, Vec<String>, Diagnostics), Error> {
        let mut groups: IndexMap<u32, Vec<usize>> = IndexMap::new();
        for (index, (nt, _)) in pairs.iter().enumerate() {
            let event: NaSubstitution = nt.trim().parse()?;
            groups.entry(event.codon_position()).or_default().push(index);
        }

        let mut resolved: Vec<Option<(String, String)>> = vec![None; pairs.len()];
        let mut diagnostics = Diagnostics::default();
        for indices in groups.values() {
            let (silent, explicit): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .copied()
                .partition(|&index| pairs[index].1.contains("p.="));

            if !silent.is_empty() && silent.len() != indices.len() {
                let group_rep = indices
                    .iter()
                    .map(|&index| format!("{} {}", pairs[index].0, pairs[index].1))
                    .collect::<Vec<_>>()
                    .join(", ");
                diagnostics.push(Diagnostic::PartiallySynonymous {
                    group: group_rep,
                    variant: original.to_string(),
                });
            }

            if !silent.is_empty() {
                let events = silent
                    .iter()
                    .map(|&index| pairs[index].0.trim().parse())
                    .collect::<Result<Vec<NaSubstitution>, _>>()?;
                let inferred = self.infer_silent_substitution(&events, original)?;
                for &index in &silent {
                    resolved[index] = Some((pairs[index].0.clone(), inferred.clone()));
                }
            }
            for &index in &explicit {
                resolved[index] = Some(pairs[index].clone());
            }
        }

        let (nt_variants, pro_variants) = resolved.into_iter().flatten().unzip();
        Ok((nt_variants, pro_variants, diagnostics))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sequence::WildTypeSequence;

    fn wt() -> WildTypeSequence {
        // Met-Lys-Leu-Thr
        WildTypeSequence::new("ATGAAACTGACA").expect("invalid test sequence")
    }

    fn events(variants: &[&str]) -> Vec<NaSubstitution> {
        variants
            .iter()
            .map(|v| v.parse().expect("invalid test variant"))
            .collect()
    }

    #[test]
    fn infers_wild_type_residue_for_silent_group() -> Result<(), Error> {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        // AAA -> AAG is Lys -> Lys.
        let inferred =
            inferencer.infer_silent_substitution(&events(&["c.6A>G"]), "c.6A>G (p.=)")?;
        assert_eq!(inferred, "p.Lys2=");
        Ok(())
    }

    #[test]
    fn infers_from_multiple_events_in_one_codon() -> Result<(), Error> {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        // CTG -> TTA is Leu -> Leu.
        let inferred = inferencer
            .infer_silent_substitution(&events(&["c.9G>A", "c.7C>T"]), "row")?;
        assert_eq!(inferred, "p.Leu3=");
        Ok(())
    }

    #[test]
    fn forces_reference_for_bare_silent_events() -> Result<(), Error> {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        let inferred = inferencer.infer_silent_substitution(&events(&["c.6="]), "row")?;
        assert_eq!(inferred, "p.Lys2=");
        Ok(())
    }

    #[test]
    fn rejects_multi_codon_groups() {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        assert!(matches!(
            inferencer.infer_silent_substitution(&events(&["c.4A>G", "c.7C>T"]), "row"),
            Err(Error::MultiCodonGroup(_))
        ));
    }

    #[test]
    fn rejects_out_of_bounds_positions() {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        assert!(matches!(
            inferencer.infer_silent_substitution(&events(&["c.100A>G"]), "row"),
            Err(Error::OutOfBounds { position: 100, .. })
        ));
    }

    #[test]
    fn rejects_reference_mismatch() {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        // Position 6 is 'A', not 'C'.
        assert!(matches!(
            inferencer.infer_silent_substitution(&events(&["c.6C>G"]), "row"),
            Err(Error::ReferenceMismatch {
                position: 6,
                expected: 'A',
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_synonymous_group() {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        // AAA -> GAA is Lys -> Glu, not synonymous.
        assert!(matches!(
            inferencer.infer_silent_substitution(&events(&["c.4A>G"]), "c.4A>G p.="),
            Err(Error::SynonymyViolation { .. })
        ));
    }

    #[test]
    fn resolve_keeps_input_order() -> Result<(), Error> {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        // Codon groups appear non-contiguously: positions 6 and 12 are
        // codons 2 and 4, position 5 is codon 2 again.
        let pairs = vec![
            ("c.6A>G".to_string(), "(p.=)".to_string()),
            ("c.12A>T".to_string(), "(p.Thr4Ser)".to_string()),
            ("c.5A>A".to_string(), "(p.=)".to_string()),
        ];
        let (nt, pro, diagnostics) = inferencer.resolve_mixed(&pairs, "row")?;
        assert_eq!(nt, vec!["c.6A>G", "c.12A>T", "c.5A>A"]);
        assert_eq!(pro, vec!["p.Lys2=", "(p.Thr4Ser)", "p.Lys2="]);
        assert!(diagnostics.is_empty());
        Ok(())
    }

    #[test]
    fn resolve_warns_on_partially_synonymous_group() -> Result<(), Error> {
        let sequence = wt();
        let inferencer = SilentInferencer::new(&sequence);
        // Both events hit codon 2; one claims silence, one is explicit.
        let pairs = vec![
            ("c.6A>G".to_string(), "(p.=)".to_string()),
            ("c.4A>G".to_string(), "(p.Lys2Glu)".to_string()),
        ];
        let (nt, pro, diagnostics) = inferencer.resolve_mixed(&pairs, "row")?;
        assert_eq!(nt, vec!["c.6A>G", "c.4A>G"]);
        assert_eq!(pro, vec!["p.Lys2=", "(p.Lys2Glu)"]);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics
            .iter()
            .next()
            .map(|d| d.to_string())
            .unwrap_or_default()
            .contains("partially synonymous"));
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
