//! Section Kinds
//!
//! A section is a named slice of the homepage document that is edited and
//! persisted independently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    HeroSlides,
    Services,
    ItCards,
    IndustryCards,
    TechnologyCards,
    QualityIndustry,
    QualityDigital,
    Testimonials,
    Pricing,
    BlogPosts,
}

impl SectionKind {
    pub const ALL: [SectionKind; 10] = [
        SectionKind::HeroSlides,
        SectionKind::Services,
        SectionKind::ItCards,
        SectionKind::IndustryCards,
        SectionKind::TechnologyCards,
        SectionKind::QualityIndustry,
        SectionKind::QualityDigital,
        SectionKind::Testimonials,
        SectionKind::Pricing,
        SectionKind::BlogPosts,
    ];

    /// Slug used for storage keys and in the wire payload tag
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::HeroSlides => "hero-slides",
            SectionKind::Services => "services",
            SectionKind::ItCards => "it-cards",
            SectionKind::IndustryCards => "industry-cards",
            SectionKind::TechnologyCards => "technology-cards",
            SectionKind::QualityIndustry => "quality-industry",
            SectionKind::QualityDigital => "quality-digital",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Pricing => "pricing",
            SectionKind::BlogPosts => "blog-posts",
        }
    }

    /// Heading shown on the admin dashboard
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::HeroSlides => "Hero Slides",
            SectionKind::Services => "Services",
            SectionKind::ItCards => "IT Cards",
            SectionKind::IndustryCards => "Industry Cards",
            SectionKind::TechnologyCards => "Technology Cards",
            SectionKind::QualityIndustry => "Quality: Industry",
            SectionKind::QualityDigital => "Quality: Digital",
            SectionKind::Testimonials => "Testimonials",
            SectionKind::Pricing => "Pricing",
            SectionKind::BlogPosts => "Blog Posts",
        }
    }

    /// Sections rendered with a decorative top/bottom image pair
    pub fn has_image_pair(&self) -> bool {
        matches!(
            self,
            SectionKind::Services
                | SectionKind::ItCards
                | SectionKind::IndustryCards
                | SectionKind::TechnologyCards
                | SectionKind::QualityIndustry
        )
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for SectionKind {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip_through_from_str() {
        for kind in SectionKind::ALL {
            assert_eq!(kind.as_str().parse::<SectionKind>().unwrap(), kind);
        }
        assert!("footer".parse::<SectionKind>().is_err());
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&SectionKind::TechnologyCards).unwrap();
        assert_eq!(json, "\"technology-cards\"");
    }
}
