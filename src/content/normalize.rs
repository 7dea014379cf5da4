//! Converts an arbitrary raw content document into the canonical model.
//!
//! Total and idempotent: any input (`None`, `{}`, a scalar, a document from
//! any historical schema) produces a fully populated [`Content`] with every
//! absent or mistyped field at its default. Nothing here performs I/O.

use serde_json::Value;

use crate::content::aliases::{self, StringField, PLAN_BULLET_SOURCES};
use crate::content::ids::new_id;
use crate::core::types::{Branding, Contact, Content, Hero, PricingPlan, Project};

pub fn normalize(raw: Option<&Value>) -> Content {
    let null = Value::Null;
    let root = raw.unwrap_or(&null);
    Content {
        branding: Branding {
            name: resolve(root, &aliases::BRANDING_NAME),
            tagline: resolve(root, &aliases::BRANDING_TAGLINE),
            logo_url: resolve(root, &aliases::BRANDING_LOGO_URL),
            logo_path: resolve(root, &aliases::BRANDING_LOGO_PATH),
        },
        hero: Hero {
            title: resolve(root, &aliases::HERO_TITLE),
            subtitle: resolve(root, &aliases::HERO_SUBTITLE),
            hero_image_url: resolve(root, &aliases::HERO_IMAGE_URL),
            hero_image_path: resolve(root, &aliases::HERO_IMAGE_PATH),
            resume_url: resolve(root, &aliases::HERO_RESUME_URL),
        },
        skills: skill_list(root.get("skills")),
        projects: entries(root, "projects").iter().map(normalize_project).collect(),
        pricing: entries(root, "pricing").iter().map(normalize_plan).collect(),
        contact: Contact {
            email: resolve(root, &aliases::CONTACT_EMAIL),
            instagram: resolve(root, &aliases::CONTACT_INSTAGRAM),
            linkedin: resolve(root, &aliases::CONTACT_LINKEDIN),
            formspree: resolve(root, &aliases::CONTACT_FORMSPREE),
            text: resolve(root, &aliases::CONTACT_TEXT),
        },
    }
}

/// Walks a dotted path from `root`. Any missing key or non-object along the
/// way yields `None`, which the caller treats as "field absent".
fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(root, |node, key| node.get(key))
}

/// First source in the chain holding a non-empty string, else the default.
fn resolve(root: &Value, field: &StringField) -> String {
    field
        .sources
        .iter()
        .filter_map(|path| lookup(root, path))
        .filter_map(Value::as_str)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| field.default.to_string())
}

fn entries<'v>(root: &'v Value, key: &str) -> &'v [Value] {
    root.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Existing ids pass through untouched; a record that never had one gets a
/// fresh id here, exactly once.
fn record_id(record: &Value) -> String {
    record
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_id)
}

fn normalize_project(record: &Value) -> Project {
    Project {
        id: record_id(record),
        title: resolve(record, &aliases::PROJECT_TITLE),
        description: resolve(record, &aliases::PROJECT_DESCRIPTION),
        stack: resolve(record, &aliases::PROJECT_STACK),
        live_url: resolve(record, &aliases::PROJECT_LIVE_URL),
        github_url: resolve(record, &aliases::PROJECT_GITHUB_URL),
        image_url: resolve(record, &aliases::PROJECT_IMAGE_URL),
        image_path: resolve(record, &aliases::PROJECT_IMAGE_PATH),
    }
}

fn normalize_plan(record: &Value) -> PricingPlan {
    PricingPlan {
        id: record_id(record),
        name: resolve(record, &aliases::PLAN_NAME),
        price: resolve(record, &aliases::PLAN_PRICE),
        description: resolve(record, &aliases::PLAN_DESCRIPTION),
        bullets: bullet_list(record),
    }
}

/// First alias key whose value is an array wins; a non-array under both keys
/// collapses to an empty list. Non-string elements are dropped.
fn bullet_list(record: &Value) -> Vec<String> {
    for key in PLAN_BULLET_SOURCES {
        if let Some(items) = record.get(*key).and_then(Value::as_array) {
            return items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
    }
    Vec::new()
}

/// Skills render as plain strings, but one historical shape stored them as
/// `{name}` objects; anything else is dropped.
fn skill_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.clone()),
                    Value::Object(map) => map
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn scalar_input_normalizes_like_an_empty_document() {
        let from_number = normalize(Some(&serde_json::json!(42)));
        let from_nothing = normalize(None);
        assert_eq!(from_number, from_nothing);
        assert_eq!(from_number.branding.name, "OMER TECH DUDE");
    }

    #[test]
    fn empty_string_falls_through_to_the_next_alias() {
        let raw = serde_json::json!({
            "branding": { "name": "" },
            "hero": { "name": "From Hero" }
        });
        assert_eq!(normalize(Some(&raw)).branding.name, "From Hero");
    }

    #[test]
    fn wrong_typed_field_degrades_to_default() {
        let raw = serde_json::json!({
            "hero": { "title": 7, "headline": ["not", "a", "string"] },
            "skills": "not-an-array"
        });
        let content = normalize(Some(&raw));
        assert_eq!(content.hero.title, "Front-End & Web Developer");
        assert!(content.skills.is_empty());
    }

    #[test]
    fn object_shaped_skills_contribute_their_name() {
        let raw = serde_json::json!({
            "skills": ["HTML", { "name": "CSS" }, { "level": 3 }, 12]
        });
        assert_eq!(normalize(Some(&raw)).skills, vec!["HTML", "CSS"]);
    }
}
