//! Token-level handling of raw variant strings.
//!
//! Raw rows arrive as comma-delimited token lists, each token either a bare
//! nucleotide event, a bare protein event, or an `nt pro` dual pair with an
//! optionally parenthesized protein half.  This module classifies and
//! re-serializes such strings; the per-event grammar lives in
//! [`crate::parser::parse_funcs`].

use crate::parser::display::Unprefixed;
use crate::parser::ds::{NaPrefix, NaSubstitution, ProteinSubstitution};
use crate::parser::error::Error;

/// Sentinel strings that bypass parsing and validation: Enrich2 emits `_wt`
/// for wild-type rows and `_sy` for synonymous rows.
pub static SPECIAL_VARIANTS: &[&str] = &["_wt", "_sy"];

/// Whether the (trimmed) string is a sentinel variant.
pub fn is_special(variant: &str) -> bool {
    SPECIAL_VARIANTS.contains(&variant.trim())
}

/// Whether the string uses the bracketed multi-variant convention, e.g.
/// `c.[4A>G;9C>T]`.
pub fn is_multi(variant: &str) -> bool {
    let v = variant.trim();
    v.len() > 4
        && matches!(v.chars().next(), Some('c' | 'g' | 'm' | 'n' | 'p'))
        && v.get(1..3) == Some(".[")
        && v.ends_with(']')
}

/// Explode a bracketed multi-variant string into its single-variant parts;
/// anything else is returned as a one-element list.
pub fn split_variant(variant: &str) -> Vec<String> {
    let v = variant.trim();
    if !is_multi(v) {
        return vec![v.to_string()];
    }
    let prefix = &v[..1];
    v[3..v.len() - 1]
        .split(';')
        .map(|event| format!("{}.{}", prefix, event.trim()))
        .collect()
}

/// Strip one pair of surrounding parentheses, if present.
pub(crate) fn strip_parens(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('(') && token.ends_with(')') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// Classification of a comma-delimited variant string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenClass {
    /// At least one token is an `nt pro` dual pair.
    Mixed,
    /// Every token starts with a nucleotide-type prefix.
    NucleotideOnly,
    /// Every token starts with the protein prefix.
    ProteinOnly,
}

/// Classify a raw variant string by inspecting its comma-delimited tokens.
pub fn classify(variant: &str) -> Result<TokenClass, Error> {
    let tokens: Vec<&str> = variant.split(',').map(str::trim).collect();

    let is_mixed = tokens.iter().any(|t| t.split(' ').count() == 2);
    let is_nt_only = tokens
        .iter()
        .all(|t| t.chars().next().map(|c| NaPrefix::from_char(c).is_some()) == Some(true));
    let is_pro_only = tokens
        .iter()
        .all(|t| t.chars().next() == Some('p'));

    if is_mixed {
        Ok(TokenClass::Mixed)
    } else if is_nt_only {
        Ok(TokenClass::NucleotideOnly)
    } else if is_pro_only {
        Ok(TokenClass::ProteinOnly)
    } else {
        Err(Error::UnclassifiableVariant(variant.to_string()))
    }
}

/// Split a mixed variant string into its `(nt, pro)` token pairs.
pub fn split_pairs(variant: &str) -> Result<Vec<(String, String)>, Error> {
    variant
        .split(',')
        .map(|token| {
            let token = token.trim();
            let mut parts = token.split(' ');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(nt), Some(pro), None) if !nt.is_empty() && !pro.is_empty() => {
                    Ok((nt.to_string(), pro.to_string()))
                }
                _ => Err(Error::MalformedVariantPair(token.to_string())),
            }
        })
        .collect()
}

/// Parse a comma-delimited string containing only nucleotide HGVS syntax
/// into a canonical (possibly multi-event) HGVS string.
pub fn parse_nucleotide_variant(variant: &str) -> Result<String, Error> {
    let tokens: Vec<&str> = variant.split(',').collect();
    parse_nucleotide_tokens(&tokens)
}

/// As [`parse_nucleotide_variant`], over an already-split token list.
///
/// A sentinel as first token short-circuits and is returned verbatim; other
/// sentinel tokens pass into the event list untouched.  All non-sentinel
/// tokens must share one prefix type.
pub fn parse_nucleotide_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<String, Error> {
    let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref().trim()).collect();
    match tokens.first() {
        None => return Err(Error::MalformedNucleotideVariant(String::new())),
        Some(first) if is_special(first) => return Ok(first.to_string()),
        _ => {}
    }

    let mut events: Vec<Option<NaSubstitution>> = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if is_special(token) {
            events.push(None);
        } else {
            events.push(Some(token.parse()?));
        }
    }

    let prefixes: Vec<NaPrefix> = events
        .iter()
        .flatten()
        .map(|event| event.prefix)
        .collect();
    let prefix = prefixes
        .first()
        .copied()
        .ok_or_else(|| Error::MalformedNucleotideVariant(tokens.join(", ")))?;
    if prefixes.iter().any(|p| *p != prefix) {
        return Err(Error::MixedPrefix(tokens.join(", ")));
    }

    let bodies: Vec<String> = events
        .iter()
        .zip(&tokens)
        .map(|(event, token)| match event {
            Some(event) => Unprefixed(event).to_string(),
            None => token.to_string(),
        })
        .collect();
    if bodies.len() == 1 {
        Ok(format!("{}.{}", prefix, bodies[0]))
    } else {
        Ok(format!("{}.[{}]", prefix, bodies.join(";")))
    }
}

/// Parse a comma-delimited string containing only protein HGVS syntax into
/// a canonical (possibly multi-event) HGVS string.
pub fn parse_protein_variant(variant: &str) -> Result<String, Error> {
    let tokens: Vec<&str> = variant.split(',').collect();
    parse_protein_tokens(&tokens)
}

/// As [`parse_protein_variant`], over an already-split token list.
///
/// Surrounding parentheses are stripped from each token before parsing.
pub fn parse_protein_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<String, Error> {
    let tokens: Vec<&str> = tokens
        .iter()
        .map(|t| strip_parens(t.as_ref().trim()).trim())
        .collect();
    match tokens.first() {
        None => return Err(Error::MalformedProteinVariant(String::new())),
        Some(first) if is_special(first) => return Ok(first.to_string()),
        _ => {}
    }

    let mut bodies: Vec<String> = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if is_special(token) {
            bodies.push(token.to_string());
        } else {
            let event: ProteinSubstitution = token.parse()?;
            bodies.push(Unprefixed(&event).to_string());
        }
    }

    if bodies.len() == 1 {
        Ok(format!("p.{}", bodies[0]))
    } else {
        Ok(format!("p.[{}]", bodies.join(";")))
    }
}
