//! Per-course grade classification.

use crate::grading::types::GradeValue;

/// How a single course participates in the aggregate totals.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeClass {
    /// Numeric score: weighs into the GPA; completes its credits at 55+.
    Scored(f64),
    /// Credit awarded without GPA weight.
    CreditOnly,
    /// No credit toward GPA or completion.
    Excluded,
}

/// Classifies a grade value against the grading policy.
///
/// Textual grades are compared case-insensitively with whitespace runs
/// collapsed. Arm order matters: the `exemption with points` substring
/// check must run before the exact-match exemption checks.
///
/// | Grade                                    | Class      |
/// |------------------------------------------|------------|
/// | numeric score                            | Scored     |
/// | "pass"                                   | CreditOnly |
/// | contains "exemption with points"         | CreditOnly |
/// | "exemption" / "exemption without points" | Excluded   |
/// | anything else (unknown text, absent)     | Excluded   |
pub fn classify(grade: Option<&GradeValue>) -> GradeClass {
    let text = match grade {
        Some(GradeValue::Numeric(score)) => return GradeClass::Scored(*score),
        Some(GradeValue::Text(text)) => text,
        None => return GradeClass::Excluded,
    };

    let normalized = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match normalized.as_str() {
        "pass" => GradeClass::CreditOnly,
        s if s.contains("exemption with points") => GradeClass::CreditOnly,
        "exemption" | "exemption without points" => GradeClass::Excluded,
        _ => GradeClass::Excluded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> GradeValue {
        GradeValue::Text(s.to_string())
    }

    #[test]
    fn test_numeric_grades_are_scored() {
        assert_eq!(
            classify(Some(&GradeValue::Numeric(92.0))),
            GradeClass::Scored(92.0)
        );
        assert_eq!(
            classify(Some(&GradeValue::Numeric(0.0))),
            GradeClass::Scored(0.0)
        );
    }

    #[test]
    fn test_pass_is_case_and_whitespace_insensitive() {
        assert_eq!(classify(Some(&text("Pass"))), GradeClass::CreditOnly);
        assert_eq!(classify(Some(&text("PASS"))), GradeClass::CreditOnly);
        assert_eq!(classify(Some(&text(" pass "))), GradeClass::CreditOnly);
    }

    #[test]
    fn test_exemption_with_points_awards_credit() {
        assert_eq!(
            classify(Some(&text("Exemption with points"))),
            GradeClass::CreditOnly
        );
        assert_eq!(
            classify(Some(&text("EXEMPTION  WITH  POINTS"))),
            GradeClass::CreditOnly
        );
    }

    #[test]
    fn test_bare_exemption_variants_are_excluded() {
        assert_eq!(classify(Some(&text("Exemption"))), GradeClass::Excluded);
        assert_eq!(
            classify(Some(&text("Exemption without points"))),
            GradeClass::Excluded
        );
    }

    #[test]
    fn test_unknown_text_and_absent_grades_are_excluded() {
        assert_eq!(classify(Some(&text("Incomplete"))), GradeClass::Excluded);
        assert_eq!(classify(Some(&text(""))), GradeClass::Excluded);
        assert_eq!(classify(None), GradeClass::Excluded);
    }

    #[test]
    fn test_digit_string_is_not_a_numeric_grade() {
        // Coercion of digit strings is the caller's job, at the
        // record-to-input boundary; the policy itself never re-parses text.
        assert_eq!(classify(Some(&text("92"))), GradeClass::Excluded);
    }
}
