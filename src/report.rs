//! Typed validation report model and the rule-family classifier.
//!
//! Structural parsing of the engine's `validationReport` element is
//! delegated to quick-xml's serde deserializer over a raw mirror of the
//! engine schema; this module's job is mapping those records into the
//! crate's own value types with clause, test number, specification and
//! description carried over verbatim.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Profile names carry the conformance part number; the part-1 profiles are
/// the only ones containing this marker. Parts 2 and 3 share a rule family
/// by domain rule.
const PART_ONE_MARKER: &str = "1";

/// Coarse classification of a violation by which conformance part produced it.
///
/// Exactly two values exist over the whole profile-name domain; the split
/// must stay two-way unless the domain model is revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleFamily {
    PartOne,
    PartTwoThree,
}

impl RuleFamily {
    /// Classify a conformance profile name into its rule family.
    pub fn from_profile(profile_name: &str) -> Self {
        if profile_name.contains(PART_ONE_MARKER) {
            RuleFamily::PartOne
        } else {
            RuleFamily::PartTwoThree
        }
    }
}

/// One instance of a document failing a specific conformance clause/test.
///
/// Identity is value equality over all five fields. The family tag is
/// derived from the report's profile name when the report is built and
/// never recomputed; it still participates in equality, so the same
/// clause/test under different conformance parts tallies separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleViolation {
    pub specification: String,
    pub clause: String,
    pub test_number: u32,
    pub family: RuleFamily,
    pub description: String,
}

/// Pass/fail counts from the report's details section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDetails {
    pub passed_rules: u32,
    pub failed_rules: u32,
    pub passed_checks: u32,
    pub failed_checks: u32,
}

/// Typed, in-memory validation report for one document.
///
/// Violation order matches the order emitted by the engine. Immutable once
/// returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub profile_name: String,
    pub compliant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    pub details: ReportDetails,
    pub violations: Vec<RuleViolation>,
    /// Raw `summary` section of the engine output, when one was present.
    /// Kept for diagnostics, never parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_summary: Option<String>,
}

impl ValidationReport {
    /// Rule family shared by every violation in this report.
    pub fn family(&self) -> RuleFamily {
        RuleFamily::from_profile(&self.profile_name)
    }
}

/// Parse one extracted XML fragment into a typed validation report.
///
/// Fails with [`ValidationError::MalformedReport`] when the deserializer
/// rejects the fragment (invalid XML, missing required fields).
pub fn parse_report(fragment: &str) -> Result<ValidationReport> {
    let raw: RawValidationReport =
        quick_xml::de::from_str(fragment).map_err(|e| ValidationError::MalformedReport {
            details: e.to_string(),
        })?;

    // The family is classified once per report and stamped onto every
    // violation; the fold over the tally never recomputes it.
    let family = RuleFamily::from_profile(&raw.profile_name);
    let violations = raw
        .details
        .rules
        .into_iter()
        .map(|rule| RuleViolation {
            specification: rule.specification,
            clause: rule.clause,
            test_number: rule.test_number,
            family,
            description: rule.description.unwrap_or_default(),
        })
        .collect();

    Ok(ValidationReport {
        profile_name: raw.profile_name,
        compliant: raw.is_compliant,
        statement: raw.statement,
        details: ReportDetails {
            passed_rules: raw.details.passed_rules,
            failed_rules: raw.details.failed_rules,
            passed_checks: raw.details.passed_checks,
            failed_checks: raw.details.failed_checks,
        },
        violations,
        engine_summary: None,
    })
}

/// Raw mirror of the engine's `validationReport` element. The schema is
/// owned by the engine; unknown children (`object`, `test`, `check`, ...)
/// are ignored.
#[derive(Debug, Deserialize)]
struct RawValidationReport {
    #[serde(rename = "@profileName")]
    profile_name: String,
    #[serde(rename = "@statement", default)]
    statement: Option<String>,
    #[serde(rename = "@isCompliant", default)]
    is_compliant: bool,
    #[serde(default)]
    details: RawDetails,
}

#[derive(Debug, Default, Deserialize)]
struct RawDetails {
    #[serde(rename = "@passedRules", default)]
    passed_rules: u32,
    #[serde(rename = "@failedRules", default)]
    failed_rules: u32,
    #[serde(rename = "@passedChecks", default)]
    passed_checks: u32,
    #[serde(rename = "@failedChecks", default)]
    failed_checks: u32,
    #[serde(rename = "rule", default)]
    rules: Vec<RawRuleSummary>,
}

#[derive(Debug, Deserialize)]
struct RawRuleSummary {
    #[serde(rename = "@specification")]
    specification: String,
    #[serde(rename = "@clause")]
    clause: String,
    #[serde(rename = "@testNumber")]
    test_number: u32,
    #[serde(default)]
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<validationReport profileName="PDF/A-1B validation profile" statement="PDF file is not compliant with Validation Profile requirements." isCompliant="false">
  <details passedRules="98" failedRules="2" passedChecks="512" failedChecks="3">
    <rule specification="ISO 19005-1:2005" clause="6.1.7" testNumber="1" status="failed" passedChecks="0" failedChecks="2">
      <description>The file trailer dictionary shall contain the ID keyword.</description>
      <object>CosTrailer</object>
      <test>ID != null</test>
    </rule>
    <rule specification="ISO 19005-1:2005" clause="6.2.3" testNumber="2" status="failed" passedChecks="0" failedChecks="1">
      <description>DeviceRGB shall only be used if a device independent DefaultRGB colour space has been set.</description>
      <object>PDDeviceRGB</object>
      <test>gOutputCS != null</test>
    </rule>
  </details>
</validationReport>"#;

    #[test]
    fn test_parse_report_fields_verbatim() {
        let report = parse_report(FRAGMENT).unwrap();

        assert_eq!(report.profile_name, "PDF/A-1B validation profile");
        assert!(!report.compliant);
        assert_eq!(
            report.statement.as_deref(),
            Some("PDF file is not compliant with Validation Profile requirements.")
        );
        assert_eq!(report.details.passed_rules, 98);
        assert_eq!(report.details.failed_rules, 2);
        assert_eq!(report.details.passed_checks, 512);
        assert_eq!(report.details.failed_checks, 3);

        assert_eq!(report.violations.len(), 2);
        let first = &report.violations[0];
        assert_eq!(first.specification, "ISO 19005-1:2005");
        assert_eq!(first.clause, "6.1.7");
        assert_eq!(first.test_number, 1);
        assert_eq!(
            first.description,
            "The file trailer dictionary shall contain the ID keyword."
        );
        assert_eq!(first.family, RuleFamily::PartOne);

        // Engine emission order is preserved.
        assert_eq!(report.violations[1].clause, "6.2.3");
    }

    #[test]
    fn test_parse_report_empty_details() {
        let fragment = r#"<?xml version="1.0" encoding="UTF-8"?>
<validationReport profileName="PDF/A-2B validation profile" isCompliant="true">
  <details passedRules="104" failedRules="0" passedChecks="2048" failedChecks="0"/>
</validationReport>"#;

        let report = parse_report(fragment).unwrap();

        assert!(report.compliant);
        assert!(report.violations.is_empty());
        assert_eq!(report.family(), RuleFamily::PartTwoThree);
    }

    #[test]
    fn test_parse_report_rejects_invalid_xml() {
        let error = parse_report("<validationReport").unwrap_err();

        match error {
            ValidationError::MalformedReport { .. } => (),
            other => panic!("Expected MalformedReport, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_report_rejects_missing_required_attributes() {
        let fragment = r#"<?xml version="1.0" encoding="UTF-8"?>
<validationReport isCompliant="false">
  <details>
    <rule clause="6.1.7" testNumber="1"/>
  </details>
</validationReport>"#;

        assert!(matches!(
            parse_report(fragment),
            Err(ValidationError::MalformedReport { .. })
        ));
    }

    #[test]
    fn test_classify_part_one() {
        assert_eq!(
            RuleFamily::from_profile("PDF/A-1B validation profile"),
            RuleFamily::PartOne
        );
        assert_eq!(
            RuleFamily::from_profile("PDFA_Part_1_rev_A"),
            RuleFamily::PartOne
        );
    }

    #[test]
    fn test_classify_other_parts_share_a_family() {
        assert_eq!(
            RuleFamily::from_profile("PDF/A-2B validation profile"),
            RuleFamily::PartTwoThree
        );
        assert_eq!(
            RuleFamily::from_profile("PDF/A-3A validation profile"),
            RuleFamily::PartTwoThree
        );
        assert_eq!(
            RuleFamily::from_profile(""),
            RuleFamily::PartTwoThree
        );
    }

    #[test]
    fn test_violation_identity_includes_family() {
        let base = RuleViolation {
            specification: "ISO 19005-1:2005".to_string(),
            clause: "6.1.7".to_string(),
            test_number: 1,
            family: RuleFamily::PartOne,
            description: "The file trailer dictionary shall contain the ID keyword.".to_string(),
        };
        let same = base.clone();
        let other_family = RuleViolation {
            family: RuleFamily::PartTwoThree,
            ..base.clone()
        };

        assert_eq!(base, same);
        assert_ne!(base, other_family);
    }
}
