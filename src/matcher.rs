//! Line-scan heuristic deciding whether a class source declares a member.
//!
//! There is no Java parser here. Each source line is run through an ordered
//! table of rules; the first rule that returns something other than
//! [`Verdict::Undecided`] settles the line. A member is found as soon as one
//! line yields [`Verdict::Match`]. False positives and negatives are expected.

use crate::generics::strip_generics;
use crate::link::MemberFragment;

/// Decides whether a class source declares the member a link points at.
pub trait MemberMatcher {
    fn matches(&self, source: &str, fragment: &MemberFragment) -> bool;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Stop evaluating this line; it cannot match.
    Skip,
    Match,
    /// Let the next rule decide.
    Undecided,
}

/// One source line as seen by the rules.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub fragment: &'a MemberFragment,
    /// The line without its line ending.
    pub raw: &'a str,
    /// `raw` with generic parameters removed.
    pub clean: String,
}

impl<'a> Candidate<'a> {
    pub fn new(fragment: &'a MemberFragment, raw: &'a str) -> Self {
        let clean = if raw.contains('<') {
            strip_generics(raw)
        } else {
            raw.to_string()
        };
        Self {
            fragment,
            raw,
            clean,
        }
    }

    /// Text between the line's first `(` and the following `)`.
    pub fn line_parenthesis(&self) -> &str {
        self.clean
            .split_once('(')
            .map(|(_, after)| after.split(')').next().unwrap_or_default())
            .unwrap_or_default()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Candidate<'_>) -> Verdict,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "blank-line",
        apply: blank_line,
    },
    Rule {
        name: "pre-filter",
        apply: pre_filter,
    },
    Rule {
        name: "field-terminator",
        apply: field_terminator,
    },
    Rule {
        name: "multi-argument",
        apply: multi_argument,
    },
    Rule {
        name: "single-argument",
        apply: single_argument,
    },
    Rule {
        name: "no-argument",
        apply: no_argument,
    },
];

/// Runs `rules` in order and returns the first decisive verdict.
pub fn evaluate(rules: &[Rule], candidate: &Candidate<'_>) -> Verdict {
    rules
        .iter()
        .map(|rule| (rule.apply)(candidate))
        .find(|verdict| *verdict != Verdict::Undecided)
        .unwrap_or(Verdict::Undecided)
}

fn blank_line(candidate: &Candidate<'_>) -> Verdict {
    if candidate.raw.is_empty() {
        Verdict::Skip
    } else {
        Verdict::Undecided
    }
}

/// Lines that do not mention the member at all are dropped before the
/// generics are stripped.
fn pre_filter(candidate: &Candidate<'_>) -> Verdict {
    let fragment = candidate.fragment;
    let needle = if fragment.has_parens {
        &fragment.name
    } else {
        &fragment.text
    };
    if !needle.is_empty() && !candidate.raw.contains(needle.as_str()) {
        Verdict::Skip
    } else {
        Verdict::Undecided
    }
}

const FIELD_TERMINATORS: [&str; 4] = [",", ";", " =", "("];

fn field_terminator(candidate: &Candidate<'_>) -> Verdict {
    let fragment = candidate.fragment;
    if !fragment.is_field() {
        return Verdict::Undecided;
    }

    let name = fragment.text.as_str();
    let line = candidate.clean.as_str();
    let terminated = line.ends_with(name)
        || FIELD_TERMINATORS
            .iter()
            .any(|t| line.contains(&format!("{name}{t}")));

    if terminated {
        Verdict::Match
    } else {
        Verdict::Undecided
    }
}

/// Every argument slot passes; argument types are never compared.
fn multi_argument(candidate: &Candidate<'_>) -> Verdict {
    let arguments = candidate.fragment.arguments();
    if arguments.len() < 2 {
        return Verdict::Undecided;
    }

    let line_arguments: Vec<&str> = candidate.line_parenthesis().split(',').collect();
    let all_slots_present = arguments.iter().enumerate().all(|(i, argument)| {
        let slot = line_arguments.get(i).copied().unwrap_or_default();
        !format!("{argument} {slot}").is_empty()
    });

    if all_slots_present {
        Verdict::Match
    } else {
        Verdict::Skip
    }
}

fn single_argument(candidate: &Candidate<'_>) -> Verdict {
    let fragment = candidate.fragment;
    if fragment.argument_list_raw.is_empty() || fragment.argument_list_raw.contains(',') {
        return Verdict::Undecided;
    }

    // A comma on the line points at another overload.
    if candidate.clean.contains(',') {
        return Verdict::Skip;
    }

    let type_name = fragment
        .argument_list_raw
        .rsplit('.')
        .next()
        .unwrap_or_default();
    if candidate
        .line_parenthesis()
        .contains(&format!("{type_name} "))
    {
        Verdict::Match
    } else {
        Verdict::Skip
    }
}

/// Also reached by field references whose terminator check failed.
fn no_argument(candidate: &Candidate<'_>) -> Verdict {
    let text = candidate.fragment.text.as_str();
    let line = candidate.clean.as_str();
    let declared =
        line.contains(&format!(" {text} ")) || line.contains(&format!(" {text};"));

    if declared && !line.contains("return") {
        Verdict::Match
    } else {
        Verdict::Skip
    }
}

/// The default matcher: [`RULES`] applied to every line of the source.
#[derive(Debug, Copy, Clone)]
pub struct HeuristicMatcher {
    rules: &'static [Rule],
}

impl Default for HeuristicMatcher {
    fn default() -> Self {
        Self { rules: RULES }
    }
}

impl HeuristicMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }
}

impl MemberMatcher for HeuristicMatcher {
    fn matches(&self, source: &str, fragment: &MemberFragment) -> bool {
        source
            .lines()
            .map(|line| Candidate::new(fragment, line))
            .any(|candidate| evaluate(self.rules, &candidate) == Verdict::Match)
    }
}

/// Decodes archive bytes as text. Invalid UTF-8 is replaced, not rejected.
pub fn decode_source(content: &[u8]) -> String {
    String::from_utf8_lossy(content).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(source: &str, fragment: &str) -> bool {
        HeuristicMatcher::new().matches(source, &MemberFragment::parse(fragment))
    }

    fn verdict(rule: fn(&Candidate<'_>) -> Verdict, line: &str, fragment: &str) -> Verdict {
        let fragment = MemberFragment::parse(fragment);
        rule(&Candidate::new(&fragment, line))
    }

    #[test]
    fn field_needs_a_terminator() {
        assert!(matches("private int count;\n", "count"));
        assert!(!matches("private int counter;\n", "count"));
        assert!(matches("    int a, count, b;\n", "count"));
        assert!(matches("    protected String name = \"x\";\n", "name"));
        assert!(matches("    public static final int LIMIT\n", "LIMIT"));
        assert!(matches("    LIMIT(1),\n", "LIMIT"));
    }

    #[test]
    fn field_falls_through_to_no_argument_rule() {
        assert!(matches("    if (count > 0 && count < max) {\n", "count"));
        assert!(!matches("    return count > 0 ? 1 : 2;\n", "count"));
    }

    #[test]
    fn field_terminator_handles_crlf() {
        assert!(matches("public int total\r\n", "total"));
    }

    #[test]
    fn single_argument_matches_bare_type_name() {
        let source = "public class Foo {\n    public void bar(String s) {}\n}\n";
        assert!(matches(source, "bar(java.lang.String)"));
        assert!(!matches(source, "bar(java.lang.Integer)"));
    }

    #[test]
    fn single_argument_skips_lines_with_commas() {
        assert!(!matches("    public void bar(String s, int n) {}\n", "bar(java.lang.String)"));
        assert!(matches(
            "    public void bar(String s, int n) {}\n    public void bar(String s) {}\n",
            "bar(java.lang.String)"
        ));
    }

    #[test]
    fn generics_are_stripped_from_candidate_lines() {
        let source = "    public void accept(List<String> items) {}\n";
        assert!(matches(source, "accept(java.util.List)"));
    }

    #[test]
    fn multi_argument_only_checks_slot_alignment() {
        let source = "    public void put(Object key, Object value) {}\n";
        assert!(matches(source, "put(K,V)"));
        // Types are not compared.
        assert!(matches(source, "put(java.lang.String,int)"));
        // Even a line without arguments passes once the name is present.
        assert!(matches("    put();\n", "put(K,V)"));
        assert!(!matches("    get(key);\n", "put(K,V)"));
    }

    #[test]
    fn no_argument_method_needs_spaced_declaration() {
        assert!(matches("    public void close() {\n", "close()"));
        assert!(matches("    abstract void close();\n", "close()"));
        assert!(!matches("        stream.flush(); this.close();\n", "close()"));
        assert!(!matches("    void closeAll() {\n", "close()"));
    }

    #[test]
    fn no_argument_rejects_any_line_containing_return() {
        assert!(!matches(" public void close() { return; }\n", "close()"));
        assert!(!matches("    public Foo returnsSelf() {\n", "returnsSelf()"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(verdict(blank_line, "", "count"), Verdict::Skip);
        assert_eq!(verdict(blank_line, "  ", "count"), Verdict::Undecided);
    }

    #[test]
    fn pre_filter_uses_name_before_parenthesis() {
        assert_eq!(verdict(pre_filter, "void other() {", "bar(int)"), Verdict::Skip);
        assert_eq!(verdict(pre_filter, "void bar(int x) {", "bar(int)"), Verdict::Undecided);
        assert_eq!(verdict(pre_filter, "int total;", "count"), Verdict::Skip);
    }

    #[test]
    fn rules_run_in_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "blank-line",
                "pre-filter",
                "field-terminator",
                "multi-argument",
                "single-argument",
                "no-argument",
            ]
        );
    }

    #[test]
    fn custom_rule_tables_can_be_supplied() {
        const ONLY_BLANK: &[Rule] = &[Rule {
            name: "blank-line",
            apply: blank_line,
        }];
        let matcher = HeuristicMatcher::with_rules(ONLY_BLANK);
        assert!(!matcher.matches("private int count;\n", &MemberFragment::parse("count")));
    }

    #[test]
    fn lossy_decoding_keeps_valid_text() {
        let decoded = decode_source(b"int count;\xff\n");
        assert!(decoded.starts_with("int count;"));
    }
}
