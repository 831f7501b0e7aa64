//! Characteristic-tag rules for the BioSample template.
//!
//! GEO characteristics are free text (`tissue: liver`, `disease state: AML`). The
//! rules below recognize the handful of tags that BioSample has a slot for. Every
//! rule is a full, case-insensitive match against the tag and every rule is tried
//! against every tag, so one characteristic may feed more than one slot.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Where a matching characteristic value goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Tissue,
    Age,
    Sex,
    /// Optional attribute with this name.
    Attribute(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: &'static str,
    pub target: Target,
}

pub const DISEASE_ATTRIBUTE: &str = "disease";

pub const RULES: &[Rule] = &[
    Rule {
        pattern: r"tissues?",
        target: Target::Tissue,
    },
    Rule {
        pattern: r"\bage",
        target: Target::Age,
    },
    Rule {
        pattern: r"\b(sex|gender)",
        target: Target::Sex,
    },
    Rule {
        pattern: r"disease|condition|disease state",
        target: Target::Attribute(DISEASE_ATTRIBUTE),
    },
    Rule {
        pattern: r"disease stage",
        target: Target::Attribute("disease stage"),
    },
    Rule {
        pattern: r"developmental stage|dev stage",
        target: Target::Attribute("developmental stage"),
    },
    Rule {
        pattern: r"treatment",
        target: Target::Attribute("treatment"),
    },
    Rule {
        pattern: r"ethnicity",
        target: Target::Attribute("ethnicity"),
    },
    Rule {
        pattern: r"race",
        target: Target::Attribute("race"),
    },
];

static COMPILED: LazyLock<Vec<(Regex, Target)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| {
            let anchored = format!("(?i)^(?:{})$", rule.pattern);
            let regex = Regex::new(&anchored).expect("classification patterns are valid");
            (regex, rule.target)
        })
        .collect()
});

/// Every target whose rule matches `tag`, in table order.
pub fn targets_for(tag: &str) -> Vec<Target> {
    COMPILED
        .iter()
        .filter(|(regex, _)| regex.is_match(tag))
        .map(|(_, target)| *target)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: String,
}

/// What the rules extracted from one channel's characteristics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub tissue: Option<String>,
    pub age: Option<String>,
    pub sex: Option<String>,
    pub attributes: Vec<NamedValue>,
    pub tissue_found: bool,
    pub disease_found: bool,
}

/// Runs every rule over every `(tag, value)` pair. Later tags overwrite earlier
/// ones for the single-valued slots.
pub fn classify<'a, I>(characteristics: I) -> Classification
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut result = Classification::default();
    for (tag, value) in characteristics {
        for target in targets_for(tag) {
            match target {
                Target::Tissue => {
                    result.tissue = Some(value.clone());
                    result.tissue_found = true;
                }
                Target::Age => result.age = Some(value.clone()),
                Target::Sex => result.sex = Some(value.clone()),
                Target::Attribute(name) => {
                    if name == DISEASE_ATTRIBUTE {
                        result.disease_found = true;
                    }
                    result.attributes.push(NamedValue {
                        name: name.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn tissue_accepts_plural_and_any_case() {
        assert_eq!(targets_for("Tissue"), vec![Target::Tissue]);
        assert_eq!(targets_for("tissues"), vec![Target::Tissue]);
        assert_eq!(targets_for("TISSUE"), vec![Target::Tissue]);
        assert!(targets_for("tissue type").is_empty());
    }

    #[test]
    fn plural_only_where_declared() {
        assert_eq!(targets_for("Ethnicity"), vec![Target::Attribute("ethnicity")]);
        assert!(targets_for("ethnicitys").is_empty());
        assert!(targets_for("races").is_empty());
        assert!(targets_for("ages").is_empty());
    }

    #[test]
    fn disease_variants() {
        for tag in ["disease", "Disease", "condition", "Disease State", "disease state"] {
            assert_eq!(targets_for(tag), vec![Target::Attribute(DISEASE_ATTRIBUTE)], "{tag}");
        }
        assert_eq!(
            targets_for("disease stage"),
            vec![Target::Attribute("disease stage")]
        );
    }

    #[test]
    fn sex_and_gender_share_a_slot() {
        assert_eq!(targets_for("Sex"), vec![Target::Sex]);
        assert_eq!(targets_for("gender"), vec![Target::Sex]);
        assert!(targets_for("sexual orientation").is_empty());
    }

    #[test]
    fn developmental_stage_short_form() {
        assert_eq!(
            targets_for("dev stage"),
            vec![Target::Attribute("developmental stage")]
        );
        assert_eq!(
            targets_for("Developmental Stage"),
            vec![Target::Attribute("developmental stage")]
        );
    }

    #[test]
    fn classify_sets_flags_and_attributes() {
        let mut chars = BTreeMap::new();
        chars.insert("Tissue".to_string(), "liver".to_string());
        chars.insert("disease state".to_string(), "cancer".to_string());
        chars.insert("age".to_string(), "54".to_string());
        chars.insert("race".to_string(), "unknown".to_string());
        chars.insert("cell line".to_string(), "HepG2".to_string());

        let result = classify(&chars);
        assert!(result.tissue_found);
        assert!(result.disease_found);
        assert_eq!(result.tissue.as_deref(), Some("liver"));
        assert_eq!(result.age.as_deref(), Some("54"));
        assert_eq!(result.sex, None);
        assert_eq!(
            result.attributes,
            vec![
                NamedValue {
                    name: "disease".to_string(),
                    value: "cancer".to_string()
                },
                NamedValue {
                    name: "race".to_string(),
                    value: "unknown".to_string()
                },
            ]
        );
    }

    #[test]
    fn classify_without_disease_is_incomplete() {
        let mut chars = BTreeMap::new();
        chars.insert("Tissue".to_string(), "liver".to_string());
        chars.insert("disease stage".to_string(), "II".to_string());

        let result = classify(&chars);
        assert!(result.tissue_found);
        assert!(!result.disease_found);
    }
}
