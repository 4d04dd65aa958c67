//! Data structures for representing HGVS substitution events.

use serde::{Deserialize, Serialize};

/// Nucleotide sequence type prefix of a variant, e.g., the `c` in `c.4A>G`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NaPrefix {
    /// Coding sequence (`c.`).
    Cds,
    /// Genomic sequence (`g.`).
    Genome,
    /// Mitochondrial sequence (`m.`).
    Mito,
    /// Non-coding transcript sequence (`n.`).
    Tx,
}

impl NaPrefix {
    /// The prefix for a given first character, if recognized.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'c' => Some(NaPrefix::Cds),
            'g' => Some(NaPrefix::Genome),
            'm' => Some(NaPrefix::Mito),
            'n' => Some(NaPrefix::Tx),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            NaPrefix::Cds => 'c',
            NaPrefix::Genome => 'g',
            NaPrefix::Mito => 'm',
            NaPrefix::Tx => 'n',
        }
    }
}

/// Edit of a nucleotide substitution event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NaEdit {
    /// `A>G`
    Subst { reference: char, alternative: char },
    /// `=` or `A=`
    Ident { reference: Option<char> },
}

/// A single nucleotide substitution event such as `c.4A>G` or `c.4=`.
///
/// Events are immutable value objects; coordinate adjustment produces a new
/// event via [`NaSubstitution::with_position`] rather than mutating in
/// place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaSubstitution {
    pub prefix: NaPrefix,
    /// 1-based position on the sequence the prefix refers to.
    pub position: u32,
    pub edit: NaEdit,
}

impl NaSubstitution {
    /// Whether the event leaves the sequence unchanged (`=` form, or
    /// alternative equal to reference).
    pub fn silent(&self) -> bool {
        match self.edit {
            NaEdit::Ident { .. } => true,
            NaEdit::Subst {
                reference,
                alternative,
            } => reference == alternative,
        }
    }

    /// The claimed reference base, if the event carries one.
    pub fn reference(&self) -> Option<char> {
        match self.edit {
            NaEdit::Subst { reference, .. } => Some(reference),
            NaEdit::Ident { reference } => reference,
        }
    }

    /// The alternate base, if the event carries one.
    pub fn alternative(&self) -> Option<char> {
        match self.edit {
            NaEdit::Subst { alternative, .. } => Some(alternative),
            NaEdit::Ident { .. } => None,
        }
    }

    /// 1-based position of the codon containing this event.
    pub fn codon_position(&self) -> u32 {
        self.position.div_ceil(3)
    }

    /// 1-based position of the event within its codon (1..=3).
    pub fn codon_frame(&self) -> u32 {
        self.position.saturating_sub(1) % 3 + 1
    }

    /// A copy of this event at a new position.
    pub fn with_position(&self, position: u32) -> Self {
        Self { position, ..*self }
    }

    /// A copy of this event with a new edit.
    pub fn with_edit(&self, edit: NaEdit) -> Self {
        Self { edit, ..*self }
    }
}

/// Edit of an ordinary protein substitution event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProteinEdit {
    /// `Arg`
    Subst { alternative: String },
    /// `=`
    Ident,
}

/// A single protein substitution event.
///
/// Reference and alternative residues are stored canonically as 3-letter
/// codes; 1-letter input is up-converted at parse time (`*` becomes `Ter`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProteinSubstitution {
    /// Bare silent marker `p.=` -- positionless, as emitted by Enrich2 for
    /// synonymous variants.
    NoChange,
    /// `p.Lys4Arg`, or the positioned silent form `p.Lys4=`.
    Ordinary {
        reference: String,
        /// 1-based residue position.
        position: u32,
        edit: ProteinEdit,
    },
}

impl ProteinSubstitution {
    /// Whether the event leaves the protein unchanged.
    pub fn silent(&self) -> bool {
        match self {
            ProteinSubstitution::NoChange => true,
            ProteinSubstitution::Ordinary {
                reference, edit, ..
            } => match edit {
                ProteinEdit::Ident => true,
                ProteinEdit::Subst { alternative } => alternative == reference,
            },
        }
    }

    /// The 1-based residue position, if the event carries one.
    pub fn position(&self) -> Option<u32> {
        match self {
            ProteinSubstitution::NoChange => None,
            ProteinSubstitution::Ordinary { position, .. } => Some(*position),
        }
    }

    /// The claimed reference residue (3-letter), if the event carries one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            ProteinSubstitution::NoChange => None,
            ProteinSubstitution::Ordinary { reference, .. } => Some(reference),
        }
    }

    /// The alternate residue (3-letter), if the event carries one.
    pub fn alternative(&self) -> Option<&str> {
        match self {
            ProteinSubstitution::NoChange => None,
            ProteinSubstitution::Ordinary { edit, .. } => match edit {
                ProteinEdit::Subst { alternative } => Some(alternative),
                ProteinEdit::Ident => None,
            },
        }
    }

    /// A copy of this event at a new position; the positionless `p.=` form
    /// is returned unchanged.
    pub fn with_position(&self, position: u32) -> Self {
        match self {
            ProteinSubstitution::NoChange => ProteinSubstitution::NoChange,
            ProteinSubstitution::Ordinary {
                reference, edit, ..
            } => ProteinSubstitution::Ordinary {
                reference: reference.clone(),
                position,
                edit: edit.clone(),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn na_codon_geometry() {
        let event = NaSubstitution {
            prefix: NaPrefix::Cds,
            position: 1,
            edit: NaEdit::Subst {
                reference: 'A',
                alternative: 'G',
            },
        };
        assert_eq!(event.codon_position(), 1);
        assert_eq!(event.codon_frame(), 1);
        assert_eq!(event.with_position(4).codon_position(), 2);
        assert_eq!(event.with_position(4).codon_frame(), 1);
        assert_eq!(event.with_position(9).codon_position(), 3);
        assert_eq!(event.with_position(9).codon_frame(), 3);
        assert_eq!(event.with_position(10).codon_position(), 4);
        assert_eq!(event.with_position(10).codon_frame(), 1);
    }

    #[test]
    fn na_silent() {
        let subst = NaSubstitution {
            prefix: NaPrefix::Cds,
            position: 4,
            edit: NaEdit::Subst {
                reference: 'A',
                alternative: 'G',
            },
        };
        assert!(!subst.silent());
        assert!(subst
            .with_edit(NaEdit::Subst {
                reference: 'A',
                alternative: 'A',
            })
            .silent());
        assert!(subst.with_edit(NaEdit::Ident { reference: None }).silent());
    }

    #[test]
    fn protein_silent() {
        assert!(ProteinSubstitution::NoChange.silent());
        let silent = ProteinSubstitution::Ordinary {
            reference: "Lys".to_string(),
            position: 4,
            edit: ProteinEdit::Ident,
        };
        assert!(silent.silent());
        let subst = ProteinSubstitution::Ordinary {
            reference: "Lys".to_string(),
            position: 4,
            edit: ProteinEdit::Subst {
                alternative: "Arg".to_string(),
            },
        };
        assert!(!subst.silent());
        assert_eq!(subst.position(), Some(4));
        assert_eq!(subst.reference(), Some("Lys"));
        assert_eq!(subst.alternative(), Some("Arg"));
        assert_eq!(subst.with_position(12).position(), Some(12));
        assert_eq!(
            ProteinSubstitution::NoChange.with_position(12).position(),
            None
        );
    }

    #[test]
    fn serde_round_trip() -> Result<(), anyhow::Error> {
        let event = NaSubstitution {
            prefix: NaPrefix::Cds,
            position: 4,
            edit: NaEdit::Subst {
                reference: 'A',
                alternative: 'G',
            },
        };
        let json = serde_json::to_string(&event)?;
        assert_eq!(serde_json::from_str::<NaSubstitution>(&json)?, event);
        Ok(())
    }
}
