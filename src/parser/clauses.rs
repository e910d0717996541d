//! Parser for the clause file grammar.
//!
//! Clauses are separated by `;` and the file ends with `.`. A clause is an
//! initial disjunction `(i) L1 | ... | Ln`, a universal disjunction, or a
//! coalition implication `L1 & ... & Lm -> [a1,...,ak] (M1 | ... | Mn)` with
//! `<...>` for the negative modality. Parentheses around the conjunction and
//! the disjunction are optional; `(i)` at clause start is always the initial
//! marker. An empty clause is permitted and produces the contradiction
//! directly.
//!
//! The grammar is parsed into a small AST first; `build` then interns
//! literals, constructs clauses (which may fire the empty-disjunction
//! rewrite), marks literal occurrences and builds the coalition vectors over
//! the agent universe.

use crate::error::ProverError;
use crate::logic::{ClauseId, ClauseKind, LiteralList};
use crate::state::ProverState;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, digit1, multispace0, satisfy};
use nom::combinator::{opt, recognize};
use nom::error::{ErrorKind, ParseError};
use nom::multi::separated_list0;
use nom::sequence::pair;
use nom::IResult;

/// Result of parsing an input file.
#[derive(Debug)]
pub struct ParsedInput {
    pub clauses: Vec<ClauseId>,
    /// The first empty clause committed, if the input contained one.
    pub contradiction: Option<ClauseId>,
}

// =============================================================================
// Error plumbing
// =============================================================================

/// Parse error carrying the remaining input (for the byte offset) and a
/// human-readable description of the valid continuations.
#[derive(Debug)]
pub(crate) struct SyntaxError<'a> {
    at: &'a str,
    message: String,
}

impl<'a> ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        SyntaxError {
            at: input,
            message: String::from("unexpected input"),
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, T> = IResult<&'a str, T, SyntaxError<'a>>;

/// Recoverable mismatch: lets `alt`-style callers try another branch.
fn mismatch<'a, T>(input: &'a str, message: &str) -> PResult<'a, T> {
    Err(nom::Err::Error(SyntaxError {
        at: input,
        message: message.to_string(),
    }))
}

/// Unrecoverable error: parsing halts immediately.
fn halt<'a, T>(input: &'a str, message: &str) -> PResult<'a, T> {
    Err(nom::Err::Failure(SyntaxError {
        at: input,
        message: message.to_string(),
    }))
}

fn to_prover_error(source: &str, err: nom::Err<SyntaxError<'_>>) -> ProverError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => ProverError::Parse {
            offset: source.len() - e.at.len(),
            message: e.message,
        },
        nom::Err::Incomplete(_) => ProverError::Parse {
            offset: source.len(),
            message: String::from("unexpected end of input"),
        },
    }
}

// =============================================================================
// AST
// =============================================================================

#[derive(Debug, Clone)]
struct LitAst {
    name: String,
    polarity: bool,
}

#[derive(Debug)]
enum ClauseAst {
    Initial(Vec<LitAst>),
    Universal(Vec<LitAst>),
    Coalition {
        left: Vec<LitAst>,
        negative: bool,
        agents: Vec<u32>,
        right: Vec<LitAst>,
    },
}

// =============================================================================
// Grammar
// =============================================================================

fn identifier(input: &str) -> PResult<&str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn literal(input: &str) -> PResult<LitAst> {
    let (input, _) = multispace0(input)?;
    let (input, negation) = opt(char('~'))(input)?;
    let (input, _) = multispace0(input)?;
    match identifier(input) {
        Ok((rest, name)) => Ok((
            rest,
            LitAst {
                name: name.to_string(),
                polarity: negation.is_none(),
            },
        )),
        Err(_) if negation.is_some() => halt(input, "a literal identifier must follow '~'"),
        Err(_) => mismatch(input, "a literal identifier ([A-Za-z][A-Za-z0-9_]*)"),
    }
}

/// A `|`-separated literal sequence. `after_modality` hardens the `&` check:
/// on the right side of an implication a conjunction is never legal,
/// whatever the length so far.
fn bare_disjunction(input: &str, after_modality: bool) -> PResult<'_, Vec<LitAst>> {
    let (mut rest, first) = literal(input)?;
    let mut literals = vec![first];
    loop {
        let (after_ws, _) = multispace0(rest)?;
        if let Some(after_bar) = after_ws.strip_prefix('|') {
            match literal(after_bar) {
                Ok((r, lit)) => {
                    literals.push(lit);
                    rest = r;
                }
                Err(_) => return halt(after_bar, "a literal must follow '|'"),
            }
        } else if after_ws.starts_with('&') {
            if after_modality || literals.len() > 1 {
                return halt(after_ws, "unexpected & in disjunction");
            }
            return halt(
                after_ws,
                "initial or universal clauses must be a disjunction of literals",
            );
        } else {
            return Ok((rest, literals));
        }
    }
}

/// An `&`-separated literal sequence for the left side of an implication.
/// A `|` after a single literal backs out (the clause is a disjunction
/// after all); after a real conjunction it is an error.
fn bare_conjunction(input: &str) -> PResult<'_, Vec<LitAst>> {
    let (mut rest, first) = literal(input)?;
    let mut literals = vec![first];
    loop {
        let (after_ws, _) = multispace0(rest)?;
        if let Some(after_amp) = after_ws.strip_prefix('&') {
            match literal(after_amp) {
                Ok((r, lit)) => {
                    literals.push(lit);
                    rest = r;
                }
                Err(_) => return halt(after_amp, "a literal must follow '&'"),
            }
        } else if after_ws.starts_with('|') {
            if literals.len() > 1 {
                return halt(after_ws, "unexpected | in conjunction");
            }
            return mismatch(after_ws, "a conjunction");
        } else {
            return Ok((rest, literals));
        }
    }
}

/// Disjunction with optional surrounding parentheses.
fn disjunction(input: &str, after_modality: bool) -> PResult<'_, Vec<LitAst>> {
    let (after_ws, _) = multispace0(input)?;
    if let Some(after_paren) = after_ws.strip_prefix('(') {
        let (rest, literals) = bare_disjunction(after_paren, after_modality)?;
        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix(')') {
            Some(rest) => Ok((rest, literals)),
            None => halt(rest, "')' closing the disjunction"),
        }
    } else {
        bare_disjunction(after_ws, after_modality)
    }
}

/// Conjunction with optional surrounding parentheses.
fn conjunction(input: &str) -> PResult<'_, Vec<LitAst>> {
    let (after_ws, _) = multispace0(input)?;
    if let Some(after_paren) = after_ws.strip_prefix('(') {
        let (rest, literals) = bare_conjunction(after_paren)?;
        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix(')') {
            Some(rest) => Ok((rest, literals)),
            None => mismatch(rest, "')' closing the conjunction"),
        }
    } else {
        bare_conjunction(after_ws)
    }
}

/// One agent identifier: a positive integer not starting with 0.
fn agent(input: &str) -> PResult<'_, u32> {
    let (input, _) = multispace0(input)?;
    let (rest, digits) = digit1(input)?;
    if digits.starts_with('0') {
        return halt(input, "agent identifiers are positive integers");
    }
    match digits.parse::<u32>() {
        Ok(number) => Ok((rest, number)),
        Err(_) => halt(input, "agent identifier out of range"),
    }
}

/// The coalition modality: `[a1,...,ak]` (positive) or `<a1,...,ak>`
/// (negative), possibly empty. Mixed brackets are rejected.
fn modality(input: &str) -> PResult<'_, (bool, Vec<u32>)> {
    let (after_ws, _) = multispace0(input)?;
    let (negative, rest) = if let Some(rest) = after_ws.strip_prefix('[') {
        (false, rest)
    } else if let Some(rest) = after_ws.strip_prefix('<') {
        (true, rest)
    } else {
        return halt(after_ws, "'[' or '<' after '->'");
    };
    let (rest, agents) = separated_list0(ws_char(','), agent)(rest)?;
    let (rest, _) = multispace0(rest)?;
    match (negative, rest.chars().next()) {
        (false, Some(']')) => Ok((&rest[1..], (false, agents))),
        (false, Some('>')) => halt(rest, "expected ]"),
        (false, _) => halt(rest, "']' closing the coalition"),
        (true, Some('>')) => Ok((&rest[1..], (true, agents))),
        (true, Some(']')) => halt(rest, "expected >"),
        (true, _) => halt(rest, "'>' closing the coalition"),
    }
}

fn ws_char<'a>(expected: char) -> impl FnMut(&'a str) -> PResult<'a, char> {
    move |input| {
        let (input, _) = multispace0(input)?;
        char(expected)(input)
    }
}

/// `(i)` followed by an optional disjunction. Implications are a semantic
/// error inside initial clauses.
fn initial_clause(input: &str) -> PResult<'_, ClauseAst> {
    let (input, _) = multispace0(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('i')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;

    let (rest, literals) = match disjunction(input, false) {
        Ok((rest, literals)) => (rest, literals),
        Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
        Err(_) => (input, Vec::new()),
    };
    let (after_ws, _) = multispace0(rest)?;
    if after_ws.starts_with('-') {
        return halt(after_ws, "initial clauses cannot contain an implication");
    }
    Ok((rest, ClauseAst::Initial(literals)))
}

/// `conjunction -> modality disjunction`, with either side of the
/// implication possibly empty.
fn coalition_clause(input: &str) -> PResult<'_, ClauseAst> {
    let (input, left) = match conjunction(input) {
        Ok((rest, literals)) => (rest, literals),
        Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
        Err(_) => (input, Vec::new()),
    };
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("->")(input)?;
    let (input, (negative, agents)) = modality(input)?;
    let (rest, right) = match disjunction(input, true) {
        Ok((rest, literals)) => (rest, literals),
        Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
        Err(_) => (input, Vec::new()),
    };
    Ok((
        rest,
        ClauseAst::Coalition {
            left,
            negative,
            agents,
            right,
        },
    ))
}

fn universal_clause(input: &str) -> PResult<'_, ClauseAst> {
    let (rest, literals) = disjunction(input, false)?;
    Ok((rest, ClauseAst::Universal(literals)))
}

fn clause(input: &str) -> PResult<'_, ClauseAst> {
    match initial_clause(input) {
        Ok(ok) => return Ok(ok),
        Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
        Err(_) => {}
    }
    match coalition_clause(input) {
        Ok(ok) => return Ok(ok),
        Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
        Err(_) => {}
    }
    universal_clause(input)
}

// =============================================================================
// Entry point
// =============================================================================

/// Parse a clause file and construct its clauses in the prover state.
pub fn parse_input(state: &mut ProverState, source: &str) -> Result<ParsedInput, ProverError> {
    let mut asts = Vec::new();
    let mut rest = source;
    loop {
        rest = rest.trim_start();
        let ast = if rest.starts_with(';') || rest.starts_with('.') {
            // an empty clause is the contradiction
            ClauseAst::Universal(Vec::new())
        } else {
            match clause(rest) {
                Ok((r, ast)) => {
                    rest = r;
                    ast
                }
                Err(err) => return Err(to_prover_error(source, err)),
            }
        };
        asts.push(ast);
        rest = rest.trim_start();
        if let Some(r) = rest.strip_prefix(';') {
            rest = r;
            continue;
        }
        if rest.starts_with('.') {
            break;
        }
        return Err(ProverError::Parse {
            offset: source.len() - rest.len(),
            message: String::from("expected ';', '.', '|', '&' or '->'"),
        });
    }
    log::debug!("parsed {} clauses", asts.len());
    Ok(build(state, asts))
}

/// Intern literals, construct clauses, record literal use and build the
/// coalition vectors. Vector construction is skipped when the input already
/// contained the empty clause.
fn build(state: &mut ProverState, asts: Vec<ClauseAst>) -> ParsedInput {
    let mut clauses = Vec::new();
    let mut contradiction = None;
    let mut parsed_agents: std::collections::BTreeSet<u32> = std::collections::BTreeSet::new();

    for ast in asts {
        let (kind, left_lits, agents, right_lits) = match ast {
            ClauseAst::Initial(right) => (ClauseKind::Initial, Vec::new(), Vec::new(), right),
            ClauseAst::Universal(right) => (ClauseKind::Universal, Vec::new(), Vec::new(), right),
            ClauseAst::Coalition {
                left,
                negative,
                agents,
                right,
            } => {
                let kind = if negative {
                    ClauseKind::Negative
                } else {
                    ClauseKind::Positive
                };
                (kind, left, agents, right)
            }
        };

        let mut left = LiteralList::new();
        for lit in &left_lits {
            let id = state.pool.intern(&lit.name, lit.polarity);
            left.insert(id, &state.pool);
        }
        let mut right = LiteralList::new();
        for lit in &right_lits {
            let id = state.pool.intern(&lit.name, lit.polarity);
            right.insert(id, &state.pool);
        }
        parsed_agents.extend(agents.iter().copied());
        let mut agents: Vec<u32> = agents;
        agents.sort_unstable();
        agents.dedup();

        let id = state.new_clause(left, agents, right, kind, None, None);

        // record occurrences under the disjunctive reading, on the clause
        // that actually entered the arena
        let left_ids: Vec<_> = state.clause(id).left.iter().collect();
        let right_ids: Vec<_> = state.clause(id).right.iter().collect();
        for literal in left_ids {
            let complement = state.pool.complement(literal);
            state.pool.mark_used(complement);
        }
        for literal in right_ids {
            state.pool.mark_used(literal);
        }

        if state.clause(id).size() == 0 && contradiction.is_none() {
            contradiction = Some(id);
        }
        clauses.push(id);
    }

    if contradiction.is_none() {
        let mut universe: Vec<u32> = parsed_agents.into_iter().collect();
        if let Some(requested) = state.config.num_agents {
            if requested > universe.len() {
                let mut next = universe.last().copied().unwrap_or(0);
                while universe.len() < requested {
                    next += 1;
                    universe.push(next);
                }
            }
        }
        state.num_agents = universe.len();

        for &id in &clauses {
            let (kind, agents) = {
                let clause = state.clause(id);
                (clause.kind, clause.agents.clone())
            };
            if !kind.is_coalition() {
                continue;
            }
            let identifier = id as i64;
            let vector: Vec<i64> = universe
                .iter()
                .map(|agent| {
                    let member = agents.binary_search(agent).is_ok();
                    match (kind, member) {
                        (ClauseKind::Positive, true) => identifier,
                        (ClauseKind::Positive, false) => 0,
                        (ClauseKind::Negative, true) => 0,
                        _ => -identifier,
                    }
                })
                .collect();
            state.clause_mut(id).coalition = Some(vector);
        }
    }

    ParsedInput {
        clauses,
        contradiction,
    }
}
