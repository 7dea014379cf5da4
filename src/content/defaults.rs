use serde_json::Value;

use crate::content::ids::new_id;

/// The built-in content document: what a fresh install renders before anything
/// has ever been saved, and what `reset()` restores.
///
/// Kept in the legacy shape it was historically persisted in (`hero.name`,
/// project `link`/`github`/`logoUrl`, pricing `note`/`features`,
/// `contact.formspreeUrl`) so the normalizer's alias chains are exercised even
/// on first run. Record ids are freshly generated per call.
pub fn default_document() -> Value {
    serde_json::json!({
        "nav": {
            "skillsLabel": "Skills",
            "projectsLabel": "Projects",
            "pricingLabel": "Pricing",
            "contactLabel": "Contact"
        },
        "hero": {
            "name": "OMER TECH DUDE",
            "tagline": "I build clean, modern web experiences",
            "headline": "Web Developer — clean UI, fast builds",
            "about": "I build modern React websites for founders and creators — fast, clean, and designed to convert.",
            "logoUrl": "",
            "resumeUrl": "",
            "kpi1Value": "Fast",
            "kpi1Label": "Optimized UX & performance",
            "kpi2Value": "Clean UI",
            "kpi2Label": "Modern look that feels premium",
            "kpi3Value": "Responsive",
            "kpi3Label": "Perfect on mobile + desktop",
            "kpi4Value": "Reliable",
            "kpi4Label": "Clear communication + delivery"
        },
        "skills": ["HTML", "CSS", "JavaScript", "React", "Redux", "Swift (basic)"],
        "projects": [
            {
                "id": new_id(),
                "title": "Portfolio Website",
                "description": "Modern responsive developer portfolio",
                "stack": "React • UI • Vite",
                "link": "",
                "github": "",
                "logoUrl": ""
            }
        ],
        "pricing": [
            {
                "id": new_id(),
                "name": "Basic",
                "price": "$499",
                "note": "Great for a clean landing page",
                "features": ["Landing page", "Responsive", "Fast delivery"]
            }
        ],
        "contact": {
            "text": "Email me or use the form — I reply fast.",
            "email": "hello@yourdomain.com",
            "instagram": "",
            "linkedin": "",
            "formspreeUrl": ""
        }
    })
}

/// Defaults for a record appended from the editor.
pub fn new_project_record() -> Value {
    serde_json::json!({
        "id": new_id(),
        "title": "New Project",
        "description": "What it does, and why it matters",
        "stack": "React • UI",
        "link": "",
        "github": "",
        "logoUrl": ""
    })
}

pub fn new_pricing_record() -> Value {
    serde_json::json!({
        "id": new_id(),
        "name": "New Plan",
        "price": "$0",
        "note": "",
        "features": ["Feature 1"]
    })
}

pub const NEW_SKILL: &str = "New skill";
