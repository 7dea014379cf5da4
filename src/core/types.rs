use serde::{Deserialize, Serialize};

/// The canonical content document. Everything past the normalizer is this shape:
/// every field present, never null, collections in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub branding: Branding,
    pub hero: Hero,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub pricing: Vec<PricingPlan>,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub name: String,
    pub tagline: String,
    pub logo_url: String,
    pub logo_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub hero_image_url: String,
    pub hero_image_path: String,
    pub resume_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub stack: String,
    pub live_url: String,
    pub github_url: String,
    pub image_url: String,
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub instagram: String,
    pub linkedin: String,
    pub formspree: String,
    pub text: String,
}
