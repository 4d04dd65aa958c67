//! Implementation of Display trait.
//!
//! Also, we implement an `Unprefixed` newtype that suppresses output of the
//! `c.`/`p.` prefix.  This is used when assembling multi-event strings where
//! the shared prefix sits outside the bracketed event list.

use std::fmt::Display;

use crate::parser::ds::*;

/// Newtype that allows to suppress printing of the sequence type prefix.
pub struct Unprefixed<'a, T>(pub &'a T);

impl Display for NaPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Display for Unprefixed<'_, NaSubstitution> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Unprefixed(event) = self;
        match event.edit {
            NaEdit::Subst {
                reference,
                alternative,
            } => write!(f, "{}{}>{}", event.position, reference, alternative),
            NaEdit::Ident {
                reference: Some(reference),
            } => write!(f, "{}{}=", event.position, reference),
            NaEdit::Ident { reference: None } => write!(f, "{}=", event.position),
        }
    }
}

impl Display for NaSubstitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.prefix, Unprefixed(self))
    }
}

impl Display for Unprefixed<'_, ProteinSubstitution> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Unprefixed(event) = self;
        match event {
            ProteinSubstitution::NoChange => write!(f, "="),
            ProteinSubstitution::Ordinary {
                reference,
                position,
                edit,
            } => match edit {
                ProteinEdit::Subst { alternative } => {
                    write!(f, "{}{}{}", reference, position, alternative)
                }
                ProteinEdit::Ident => write!(f, "{}{}=", reference, position),
            },
        }
    }
}

impl Display for ProteinSubstitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p.{}", Unprefixed(self))
    }
}

/// Serialize a list of nucleotide events into a single multi-event HGVS
/// string with the shared prefix outside the bracketed event list.
pub fn format_nucleotide_list(prefix: NaPrefix, events: &[NaSubstitution]) -> String {
    if events.len() == 1 {
        format!("{}.{}", prefix, Unprefixed(&events[0]))
    } else {
        let bodies = events
            .iter()
            .map(|e| Unprefixed(e).to_string())
            .collect::<Vec<_>>()
            .join(";");
        format!("{}.[{}]", prefix, bodies)
    }
}

/// Serialize a list of protein events into a single multi-event HGVS string.
pub fn format_protein_list(events: &[ProteinSubstitution]) -> String {
    if events.len() == 1 {
        format!("p.{}", Unprefixed(&events[0]))
    } else {
        let bodies = events
            .iter()
            .map(|e| Unprefixed(e).to_string())
            .collect::<Vec<_>>()
            .join(";");
        format!("p.[{}]", bodies)
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
