//! The schema-compatibility surface in one place.
//!
//! The content document has been through several shapes: fields that started
//! top-level moved under `branding`/`hero`, some keys were renamed, and a few
//! were written under two names at once. Readers resolve each canonical field
//! through its alias chain (first non-empty string wins, newest shape first);
//! writers mirror the keys listed in [`WRITE_MIRRORS`] so older readers keep
//! working.

/// One canonical string field: dotted source paths from the document root in
/// precedence order, plus the literal used when every source is empty.
pub struct StringField {
    pub sources: &'static [&'static str],
    pub default: &'static str,
}

pub const BRANDING_NAME: StringField = StringField {
    sources: &["branding.name", "hero.name", "name"],
    default: "OMER TECH DUDE",
};

pub const BRANDING_TAGLINE: StringField = StringField {
    sources: &["branding.tagline", "hero.tagline", "tagline"],
    default: "Web Development",
};

pub const BRANDING_LOGO_URL: StringField = StringField {
    sources: &["branding.logoUrl", "hero.logoUrl", "logoUrl"],
    default: "",
};

pub const BRANDING_LOGO_PATH: StringField = StringField {
    sources: &["branding.logoPath"],
    default: "",
};

pub const HERO_TITLE: StringField = StringField {
    sources: &["hero.title", "hero.headline", "heroTitle"],
    default: "Front-End & Web Developer",
};

pub const HERO_SUBTITLE: StringField = StringField {
    sources: &["hero.subtitle", "hero.about", "heroSubtitle"],
    default: "I design and build modern, responsive, and user-focused web experiences.",
};

/// Deliberately never falls back to a logo field: the hero image and the site
/// logo are distinct, and one leaking into the other was a real regression.
pub const HERO_IMAGE_URL: StringField = StringField {
    sources: &["hero.heroImageUrl", "hero.photoUrl", "hero.imageUrl", "heroImageUrl"],
    default: "",
};

pub const HERO_IMAGE_PATH: StringField = StringField {
    sources: &["hero.heroImagePath"],
    default: "",
};

pub const HERO_RESUME_URL: StringField = StringField {
    sources: &["hero.resumeUrl"],
    default: "",
};

pub const CONTACT_EMAIL: StringField = StringField {
    sources: &["contact.email", "email"],
    default: "omertechdude@gmail.com",
};

pub const CONTACT_INSTAGRAM: StringField = StringField {
    sources: &["contact.instagram", "instagram"],
    default: "",
};

pub const CONTACT_LINKEDIN: StringField = StringField {
    sources: &["contact.linkedin"],
    default: "",
};

pub const CONTACT_FORMSPREE: StringField = StringField {
    sources: &["contact.formspree", "contact.formspreeUrl", "formspree"],
    default: "",
};

pub const CONTACT_TEXT: StringField = StringField {
    sources: &["contact.text"],
    default: "",
};

// Record-level chains, resolved against one project entry.

pub const PROJECT_TITLE: StringField = StringField {
    sources: &["title"],
    default: "Untitled Project",
};

pub const PROJECT_DESCRIPTION: StringField = StringField {
    sources: &["description"],
    default: "",
};

pub const PROJECT_STACK: StringField = StringField {
    sources: &["stack", "tech"],
    default: "",
};

pub const PROJECT_LIVE_URL: StringField = StringField {
    sources: &["liveUrl", "url", "link"],
    default: "",
};

pub const PROJECT_GITHUB_URL: StringField = StringField {
    sources: &["githubUrl", "github"],
    default: "",
};

pub const PROJECT_IMAGE_URL: StringField = StringField {
    sources: &["imageUrl", "logoUrl", "image"],
    default: "",
};

pub const PROJECT_IMAGE_PATH: StringField = StringField {
    sources: &["imagePath"],
    default: "",
};

// Record-level chains, resolved against one pricing entry.

pub const PLAN_NAME: StringField = StringField {
    sources: &["name"],
    default: "Package",
};

pub const PLAN_PRICE: StringField = StringField {
    sources: &["price"],
    default: "",
};

pub const PLAN_DESCRIPTION: StringField = StringField {
    sources: &["description", "note"],
    default: "",
};

/// Array-valued alias chain for a plan's bullet list.
pub const PLAN_BULLET_SOURCES: &[&str] = &["bullets", "features"];

/// Legacy keys kept in sync on every write. Patching the left path also writes
/// the right one; pairs are listed in both directions.
pub const WRITE_MIRRORS: &[(&str, &str)] = &[
    ("contact.formspree", "contact.formspreeUrl"),
    ("contact.formspreeUrl", "contact.formspree"),
    ("hero.heroImageUrl", "hero.photoUrl"),
    ("hero.photoUrl", "hero.heroImageUrl"),
    ("branding.logoUrl", "hero.logoUrl"),
    ("hero.logoUrl", "branding.logoUrl"),
];

pub fn mirror_of(path: &str) -> Option<&'static str> {
    WRITE_MIRRORS
        .iter()
        .find(|(from, _)| *from == path)
        .map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::{mirror_of, HERO_IMAGE_URL};

    #[test]
    fn mirrors_are_symmetric() {
        for (from, to) in super::WRITE_MIRRORS {
            assert_eq!(mirror_of(to), Some(*from), "missing reverse mirror for {to}");
        }
    }

    #[test]
    fn hero_image_chain_has_no_logo_source() {
        assert!(HERO_IMAGE_URL
            .sources
            .iter()
            .all(|source| !source.to_ascii_lowercase().contains("logo")));
    }
}
