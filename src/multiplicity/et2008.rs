//! # Multiplicity configuration codes (ET2008)
//!
//! Each ET2008 row describes the hierarchy of a multiple system in one compact string.
//! Every parenthesized group is a sub-configuration, labelled by the text in front
//! of its opening parenthesis:
//!
//! ```text
//! A(9B2+10.5V3;200d,e=0.3)
//! │ │        │ │    └── eccentricity
//! │ │        │ └── period (d = days, y = years), `"` marks a separation in arcsec
//! │ │        └── orbit part, after the first top-level `;`
//! │ └── components, split on top-level `+`: [magnitude][spectral type]
//! └── label
//! ```
//!
//! Groups nest (`AB(A(…)+B(…);…)`) and are reported in the order their opening
//! parenthesis appears. A component that is itself a group carries no magnitude or
//! spectral type at the outer level.
//!
//! A group that fails to parse is skipped with a warning; only an unbalanced code
//! fails the whole row.
use std::sync::LazyLock;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, map},
    number::complete::double,
    sequence::{preceded, terminated},
    IResult, Parser,
};
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use super::{MultiplicityParser, MultiplicityRow, SkyPosition};
use crate::{
    constants::{ArcSec, Day, Degree, Magnitude, DAYS_PER_YEAR, ET2008_BIBCODE},
    models::Star,
    stellar_errors::{ParseCodeError, StellarError},
};

static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<mag>\d+(?:\.\d*)?)?\s*(?P<sp>[A-Za-z][A-Za-z0-9.:/\-]*)?")
        .expect("valid component regex")
});

const LABEL_DELIMITERS: [char; 5] = ['+', ';', ',', '(', ')'];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Et2008Row {
    pub ra: Degree,
    pub dec: Degree,
    /// Configuration code
    pub config: String,
    pub bibcode: Option<String>,
}

impl SkyPosition for Et2008Row {
    fn ra_deg(&self) -> Degree {
        self.ra
    }

    fn dec_deg(&self) -> Degree {
        self.dec
    }
}

impl Et2008Row {
    /// Sub-configurations of this row's code.
    pub fn sub_configurations(&self) -> Result<Vec<SubConfiguration>, StellarError> {
        Ok(parse_configuration(&self.config)?)
    }
}

/// One star of a sub-configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    pub mag: Option<Magnitude>,
    pub spectral_type: Option<String>,
}

impl Component {
    /// Leading magnitude and spectral type of a single star. A nested group or several
    /// joined stars carry neither.
    fn parse(text: &str) -> Component {
        if text.contains(['(', '+']) {
            return Component::default();
        }
        let Some(caps) = COMPONENT_RE.captures(text) else {
            return Component::default();
        };
        let rest = text[caps.get(0).map_or(0, |m| m.end())..].trim();
        if !rest.is_empty() {
            debug!("Ignoring {rest:?} after component {text:?}");
        }
        Component {
            mag: caps.name("mag").and_then(|m| m.as_str().parse().ok()),
            spectral_type: caps.name("sp").map(|m| m.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrbitSpec {
    pub period: Option<Day>,
    pub eccentricity: Option<f64>,
    pub separation: Option<ArcSec>,
}

enum OrbitToken {
    Eccentricity(f64),
    PeriodDays(Day),
    PeriodYears(f64),
    Separation(ArcSec),
}

fn orbit_token(input: &str) -> IResult<&str, OrbitToken> {
    all_consuming(alt((
        map(preceded(tag("e="), double), OrbitToken::Eccentricity),
        map(terminated(double, char('d')), OrbitToken::PeriodDays),
        map(terminated(double, char('y')), OrbitToken::PeriodYears),
        map(terminated(double, char('"')), OrbitToken::Separation),
    )))
    .parse(input)
}

impl OrbitSpec {
    fn parse(text: &str) -> Result<OrbitSpec, ParseCodeError> {
        let mut orbit = OrbitSpec::default();
        for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (_, parsed) = orbit_token(token)
                .map_err(|_| ParseCodeError::InvalidOrbitToken(token.to_string()))?;
            match parsed {
                OrbitToken::Eccentricity(e) => orbit.eccentricity = Some(e),
                OrbitToken::PeriodDays(p) => orbit.period = Some(p),
                OrbitToken::PeriodYears(p) => orbit.period = Some(p * DAYS_PER_YEAR),
                OrbitToken::Separation(s) => orbit.separation = Some(s),
            }
        }
        Ok(orbit)
    }
}

/// A parsed parenthesized group.
#[derive(Debug, Clone, PartialEq)]
pub struct SubConfiguration {
    pub label: String,
    pub primary: Component,
    pub secondary: Component,
    pub orbit: OrbitSpec,
}

/// Raw text of one parenthesized group.
#[derive(Debug, PartialEq)]
struct Group<'a> {
    label: &'a str,
    content: &'a str,
}

/// Every group of `code`, ordered by opening parenthesis.
fn groups(code: &str) -> Result<Vec<Group<'_>>, ParseCodeError> {
    // (open byte offset, close byte offset once seen)
    let mut spans: Vec<(usize, Option<usize>)> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for (pos, c) in code.char_indices() {
        match c {
            '(' => {
                stack.push(spans.len());
                spans.push((pos, None));
            }
            ')' => {
                let index = stack
                    .pop()
                    .ok_or(ParseCodeError::UnbalancedParenthesis(pos))?;
                spans[index].1 = Some(pos);
            }
            _ => {}
        }
    }
    if let Some(index) = stack.pop() {
        return Err(ParseCodeError::UnbalancedParenthesis(spans[index].0));
    }

    Ok(spans
        .into_iter()
        .filter_map(|(open, close)| {
            let head = &code[..open];
            let label_start = head
                .rfind(LABEL_DELIMITERS)
                .map(|i| i + 1)
                .unwrap_or(0);
            Some(Group {
                label: head[label_start..].trim(),
                content: &code[open + 1..close?],
            })
        })
        .collect())
}

/// Split on `separator` outside any parenthesis.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (pos, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..pos]);
                start = pos + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

impl Group<'_> {
    /// `Ok(None)` for a group holding a single component.
    fn parse(&self) -> Result<Option<SubConfiguration>, ParseCodeError> {
        let (components, orbit) = match split_top_level(self.content, ';').split_first() {
            Some((components, rest)) if !rest.is_empty() => (*components, Some(rest.join(";"))),
            _ => (self.content, None),
        };

        let parts: Vec<&str> = split_top_level(components, '+')
            .into_iter()
            .map(str::trim)
            .collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(ParseCodeError::EmptyComponent(self.content.to_string()));
        }
        let [first, rest @ ..] = parts.as_slice() else {
            return Ok(None);
        };
        if rest.is_empty() {
            return Ok(None);
        }

        let orbit = match orbit {
            Some(text) => OrbitSpec::parse(&text)?,
            None => OrbitSpec::default(),
        };
        Ok(Some(SubConfiguration {
            label: self.label.to_string(),
            primary: Component::parse(first),
            secondary: Component::parse(&rest.join("+")),
            orbit,
        }))
    }
}

/// Parse every sub-configuration of a configuration code.
///
/// Arguments
/// -----------------
/// * `code`: The compact configuration code, e.g. `"A(9B2+10.5V3;200d,e=0.3)"`.
///
/// Return
/// ----------
/// * The sub-configurations in order of their opening parenthesis. Groups that fail
///   to parse are logged and left out.
/// * `ParseCodeError::UnbalancedParenthesis` if the parentheses do not pair up.
pub fn parse_configuration(code: &str) -> Result<Vec<SubConfiguration>, ParseCodeError> {
    let mut parsed = Vec::new();
    for group in groups(code)? {
        match group.parse() {
            Ok(Some(sub)) => parsed.push(sub),
            Ok(None) => {}
            Err(err) => {
                warn!("Skipping group {:?} of {code:?}: {err}", group.label);
            }
        }
    }
    Ok(parsed)
}

pub struct Et2008Parser;

impl MultiplicityParser for Et2008Parser {
    type Row = Et2008Row;
    const CATALOG: &'static str = "ET2008";

    fn parse(candidates: &[Et2008Row], star: &Star) -> Vec<MultiplicityRow> {
        let mut rows = Vec::new();
        for candidate in candidates {
            let subs = match candidate.sub_configurations() {
                Ok(subs) => subs,
                Err(err) => {
                    warn!("Skipping {} code {:?}: {err}", Self::CATALOG, candidate.config);
                    continue;
                }
            };
            let bibcode = candidate
                .bibcode
                .clone()
                .unwrap_or_else(|| ET2008_BIBCODE.to_string());

            rows.extend(subs.into_iter().map(|sub| MultiplicityRow {
                component: (!sub.label.is_empty()).then_some(sub.label),
                sp1: sub.primary.spectral_type,
                sp2: sub.secondary.spectral_type,
                mag1: sub.primary.mag,
                mag2: sub.secondary.mag,
                per: sub.orbit.period,
                eccentricity: sub.orbit.eccentricity,
                separation: sub.orbit.separation,
                sep_bibcode: sub.orbit.separation.map(|_| bibcode.clone()),
                orbit_bibcode: sub.orbit.period.map(|_| bibcode.clone()),
                ..MultiplicityRow::for_star(star)
            }));
        }
        rows
    }
}

#[cfg(test)]
mod et2008_test {
    use super::*;
    use crate::models::StarId;
    use approx::assert_relative_eq;

    fn row(config: &str) -> Et2008Row {
        Et2008Row {
            ra: 83.8,
            dec: -5.4,
            config: config.to_string(),
            bibcode: None,
        }
    }

    #[test]
    fn test_single_group() {
        let star = Star::new(StarId(1), "HD 37022");
        let parsed = Et2008Parser::parse(&[row("A(9B2+10.5V3;200d,e=0.3)")], &star);
        assert_eq!(parsed.len(), 1);
        let p = &parsed[0];
        assert_eq!(p.component.as_deref(), Some("A"));
        assert_eq!(p.mag1, Some(9.0));
        assert_eq!(p.sp1.as_deref(), Some("B2"));
        assert_eq!(p.mag2, Some(10.5));
        assert_eq!(p.sp2.as_deref(), Some("V3"));
        assert_eq!(p.per, Some(200.0));
        assert_eq!(p.eccentricity, Some(0.3));
        assert_eq!(p.separation, None);
        assert_eq!(p.orbit_bibcode.as_deref(), Some(ET2008_BIBCODE));
        assert_eq!(p.sep_bibcode, None);
    }

    #[test]
    fn test_nested_groups() {
        let subs = parse_configuration("AB(A(6.1B1+7.0B3;3.5d)+B(8K0);2.1\",12y)").unwrap();
        // B(8K0) holds a single component
        assert_eq!(subs.len(), 2);

        assert_eq!(subs[0].label, "AB");
        assert_eq!(subs[0].primary, Component::default());
        assert_eq!(subs[0].secondary, Component::default());
        assert_eq!(subs[0].orbit.separation, Some(2.1));
        assert_relative_eq!(subs[0].orbit.period.unwrap(), 12.0 * 365.25);

        assert_eq!(subs[1].label, "A");
        assert_eq!(subs[1].primary.mag, Some(6.1));
        assert_eq!(subs[1].secondary.spectral_type.as_deref(), Some("B3"));
        assert_eq!(subs[1].orbit.period, Some(3.5));
    }

    #[test]
    fn test_component_keeps_leading_fields() {
        crate::unit_test_global::init_logger();
        let subs = parse_configuration("A(9.5B2?+10.5K0;5d)").unwrap();
        assert_eq!(
            subs[0].primary,
            Component {
                mag: Some(9.5),
                spectral_type: Some("B2".into())
            }
        );
        assert_eq!(subs[0].secondary.mag, Some(10.5));

        let spaced = Component::parse("8.1 B2IV");
        assert_eq!(spaced.mag, Some(8.1));
        assert_eq!(spaced.spectral_type.as_deref(), Some("B2IV"));

        let uncertain = Component::parse("7 ?");
        assert_eq!(uncertain.mag, Some(7.0));
        assert_eq!(uncertain.spectral_type, None);
    }

    #[test]
    fn test_triple_and_no_orbit() {
        let subs = parse_configuration("Aa(5A0+7F2+9K1)").unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].primary.spectral_type.as_deref(), Some("A0"));
        assert_eq!(subs[0].secondary, Component::default());
        assert_eq!(subs[0].orbit, OrbitSpec::default());
    }

    #[test]
    fn test_bad_group_is_skipped() {
        crate::unit_test_global::init_logger();
        let subs = parse_configuration("AB(A(1B0+2B1;5x)+B(3F0+4G0;1.5d))").unwrap();
        let labels: Vec<&str> = subs.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["AB", "B"]);

        let subs = parse_configuration("C(+4G0)").unwrap();
        assert!(subs.is_empty());
    }

    #[test]
    fn test_unbalanced_code() {
        assert_eq!(
            parse_configuration("A(9B2+10V3"),
            Err(ParseCodeError::UnbalancedParenthesis(1))
        );
        assert_eq!(
            parse_configuration("A9B2)"),
            Err(ParseCodeError::UnbalancedParenthesis(4))
        );

        let err = row("A(9B2+10V3").sub_configurations().unwrap_err();
        assert!(err.is_recoverable_format());
        assert_eq!(
            err,
            StellarError::ConfigurationCode(ParseCodeError::UnbalancedParenthesis(1))
        );

        let star = Star::new(StarId(2), "x");
        assert!(Et2008Parser::parse(&[row("A(9B2+10V3")], &star).is_empty());
    }

    #[test]
    fn test_separation_uses_row_bibcode() {
        let mut r = row("AB(5G2+6K0;0.8\")");
        r.bibcode = Some("2010AJ....139..919T".into());
        let parsed = Et2008Parser::parse(&[r], &Star::new(StarId(3), "y"));
        assert_eq!(parsed[0].separation, Some(0.8));
        assert_eq!(parsed[0].sep_bibcode.as_deref(), Some("2010AJ....139..919T"));
        assert_eq!(parsed[0].orbit_bibcode, None);
    }
}
