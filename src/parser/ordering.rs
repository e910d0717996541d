//! Parser for the literal-ordering file grammar: atom identifiers separated
//! by `>`, terminated by end of file. The first-declared atom receives the
//! highest rank.

use crate::error::ProverError;
use crate::logic::LiteralPool;
use nom::bytes::complete::take_while;
use nom::character::complete::satisfy;
use nom::combinator::recognize;
use nom::error::Error;
use nom::sequence::pair;
use nom::IResult;

fn identifier(input: &str) -> IResult<&str, &str, Error<&str>> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Parse an ordering file, declaring each atom in the pool in declaration
/// order.
pub fn parse_ordering(pool: &mut LiteralPool, source: &str) -> Result<(), ProverError> {
    let mut names = Vec::new();
    let mut rest = source.trim_start();
    loop {
        let (r, name) = identifier(rest).map_err(|_| ProverError::Parse {
            offset: source.len() - rest.len(),
            message: String::from("an atom identifier ([A-Za-z][A-Za-z0-9_]*)"),
        })?;
        names.push(name.to_string());
        rest = r.trim_start();
        if let Some(r) = rest.strip_prefix('>') {
            rest = r.trim_start();
            continue;
        }
        if rest.is_empty() {
            break;
        }
        return Err(ProverError::Parse {
            offset: source.len() - rest.len(),
            message: String::from("expected '>' or end of file"),
        });
    }
    for name in &names {
        pool.declare(name);
    }
    log::debug!("ordering file declared {} atoms", names.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_atoms_with_descending_ranks() {
        let mut pool = LiteralPool::with_ordering();
        parse_ordering(&mut pool, "alpha > beta > gamma").unwrap();
        assert_eq!(pool.len(), 6);
        let alpha = pool.intern("alpha", true);
        let beta = pool.intern("beta", true);
        let gamma = pool.intern("gamma", true);
        assert!(pool.rank(alpha) > pool.rank(beta));
        assert!(pool.rank(beta) > pool.rank(gamma));
    }

    #[test]
    fn whitespace_is_ignored() {
        let mut pool = LiteralPool::with_ordering();
        parse_ordering(&mut pool, "  a >\n b\t> c  ").unwrap();
        assert_eq!(pool.len(), 6);
    }

    #[test]
    fn trailing_separator_is_an_error() {
        let mut pool = LiteralPool::with_ordering();
        let err = parse_ordering(&mut pool, "a > b >").unwrap_err();
        match err {
            ProverError::Parse { offset, .. } => assert_eq!(offset, 7),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn invalid_character_reports_offset() {
        let mut pool = LiteralPool::with_ordering();
        let err = parse_ordering(&mut pool, "a > 1b").unwrap_err();
        match err {
            ProverError::Parse { offset, .. } => assert_eq!(offset, 4),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
