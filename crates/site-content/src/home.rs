//! Homepage Document
//!
//! The single aggregated document read by the public homepage and seeded
//! into the admin dashboard, plus the singleton sections that are not
//! ordered collections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::SectionRecord;
use crate::section::SectionKind;
use crate::sections::{
    BlogPostCard, DigitalService, HeroSlide, IndustryCard, ItCard, PricingPlan,
    QualityIndustryCard, ServiceCard, TechnologyCard, Testimonial,
};
use crate::validation::{require, ValidationErrors};

/// Decorative image pair framing a section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionImages {
    #[serde(default)]
    pub top_image: String,
    #[serde(default)]
    pub bottom_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlsAdvantage {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub image_url: String,
}

impl PlsAdvantage {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "heading", &self.heading);
        for (index, point) in self.points.iter().enumerate() {
            require(&mut errors, &format!("points[{}]", index), point);
        }
        errors.into_result()
    }
}

/// Heading block of the digital quality section, stored apart from its services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalHeader {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub subheading: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Composite section: heading block plus an ordered list of services
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDigitalSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub subheading: String,
    #[serde(default)]
    pub services: Vec<DigitalService>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl QualityDigitalSection {
    pub fn header(&self) -> DigitalHeader {
        DigitalHeader {
            heading: self.heading.clone(),
            subheading: self.subheading.clone(),
            images: self.images.clone(),
        }
    }

    pub fn apply_header(&mut self, header: DigitalHeader) {
        self.heading = header.heading;
        self.subheading = header.subheading;
        self.images = header.images;
    }

    pub fn from_parts(header: DigitalHeader, services: Vec<DigitalService>) -> Self {
        let mut section = Self {
            services,
            ..Default::default()
        };
        section.apply_header(header);
        section
    }
}

/// Everything the public homepage renders, in one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    #[serde(default)]
    pub hero_slides: Vec<HeroSlide>,
    #[serde(default)]
    pub services: Vec<ServiceCard>,
    #[serde(default)]
    pub it_cards: Vec<ItCard>,
    #[serde(default)]
    pub industry_cards: Vec<IndustryCard>,
    #[serde(default)]
    pub technology_cards: Vec<TechnologyCard>,
    #[serde(default)]
    pub quality_industry: Vec<QualityIndustryCard>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub pricing: Vec<PricingPlan>,
    #[serde(default)]
    pub blog_posts: Vec<BlogPostCard>,
    /// Image pairs keyed by section slug
    #[serde(default)]
    pub section_images: BTreeMap<String, SectionImages>,
    #[serde(default)]
    pub pls_advantage: PlsAdvantage,
    #[serde(default)]
    pub quality_digital: QualityDigitalSection,
}

impl HomePage {
    pub fn images_for(&self, section: SectionKind) -> SectionImages {
        self.section_images
            .get(section.as_str())
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_images(&mut self, section: SectionKind, images: SectionImages) {
        self.section_images.insert(section.as_str().to_string(), images);
    }

    /// Rewrite every image reference in the document through `f`
    pub fn map_images(&mut self, f: &dyn Fn(&str) -> String) {
        fn each<T: SectionRecord>(items: &mut [T], f: &dyn Fn(&str) -> String) {
            for item in items.iter_mut() {
                item.map_images(f);
            }
        }

        each(&mut self.hero_slides, f);
        each(&mut self.services, f);
        each(&mut self.it_cards, f);
        each(&mut self.industry_cards, f);
        each(&mut self.technology_cards, f);
        each(&mut self.quality_industry, f);
        each(&mut self.testimonials, f);
        each(&mut self.pricing, f);
        each(&mut self.blog_posts, f);

        for images in self.section_images.values_mut() {
            images.top_image = f(&images.top_image);
            images.bottom_image = f(&images.bottom_image);
        }
        self.pls_advantage.image_url = f(&self.pls_advantage.image_url);
        for image in self.quality_digital.images.iter_mut() {
            *image = f(image);
        }
    }
}

/// Join a stored image reference onto a base URL.
///
/// Absolute URLs, data URIs and empty values pass through untouched.
pub fn resolve_image_url(base: &str, path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty()
        || trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("data:")
        || base.is_empty()
    {
        return trimmed.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        trimmed.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_image_url() {
        let base = "https://cdn.example.com/media/";
        assert_eq!(
            resolve_image_url(base, "/hero/1.jpg"),
            "https://cdn.example.com/media/hero/1.jpg"
        );
        assert_eq!(
            resolve_image_url(base, "https://other.example.com/x.png"),
            "https://other.example.com/x.png"
        );
        assert_eq!(resolve_image_url(base, ""), "");
        assert_eq!(resolve_image_url("", "a.png"), "a.png");
    }

    #[test]
    fn test_home_page_map_images_covers_singletons() {
        let mut home = HomePage::default();
        home.set_images(
            SectionKind::Services,
            SectionImages {
                top_image: "top.png".into(),
                bottom_image: String::new(),
            },
        );
        home.pls_advantage.image_url = "adv.png".into();
        home.quality_digital.images = vec!["q1.png".into()];

        home.map_images(&|p| resolve_image_url("https://cdn.test", p));

        let images = home.images_for(SectionKind::Services);
        assert_eq!(images.top_image, "https://cdn.test/top.png");
        assert_eq!(images.bottom_image, "");
        assert_eq!(home.pls_advantage.image_url, "https://cdn.test/adv.png");
        assert_eq!(home.quality_digital.images[0], "https://cdn.test/q1.png");
    }

    #[test]
    fn test_missing_sections_deserialize_empty() {
        let home: HomePage = serde_json::from_str(r#"{"services":[]}"#).unwrap();
        assert!(home.hero_slides.is_empty());
        assert_eq!(home.images_for(SectionKind::ItCards), SectionImages::default());
    }

    #[test]
    fn test_pls_advantage_rejects_blank_points() {
        let advantage = PlsAdvantage {
            heading: "Why PLS".into(),
            points: vec!["Fast".into(), " ".into()],
            ..Default::default()
        };
        let errors = advantage.validate().unwrap_err();
        assert_eq!(errors.message_for("points[1]"), Some("is required"));
    }
}
