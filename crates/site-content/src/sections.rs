//! Section Records
//!
//! One record type per homepage section. Most are plain text cards; the
//! testimonial and pricing records carry typed fields and coerce input.

use serde::{Deserialize, Serialize};

use crate::order::Ordered;
use crate::record::{text_record, FieldError, FieldKind, FieldSpec, SectionRecord};
use crate::section::SectionKind;
use crate::validation::{require, ValidationErrors};

text_record! {
    /// Full-width slide in the homepage hero carousel
    pub struct HeroSlide in HeroSlides, placeholder title = "New Slide" {
        title: "title", "Title", Text, true;
        subtitle: "subtitle", "Subtitle", LongText, false;
        image_url: "imageUrl", "Image", ImageUrl, true;
        cta_label: "ctaLabel", "Button label", Text, false;
        cta_link: "ctaLink", "Button link", Link, false;
    }
}

text_record! {
    pub struct ServiceCard in Services, placeholder title = "New Item" {
        title: "title", "Title", Text, true;
        description: "description", "Description", LongText, true;
        icon: "icon", "Icon", Icon, false;
        image_url: "imageUrl", "Image", ImageUrl, false;
    }
}

text_record! {
    pub struct ItCard in ItCards, placeholder title = "New IT Card" {
        title: "title", "Title", Text, true;
        description: "description", "Description", LongText, true;
        icon: "icon", "Icon", Icon, false;
    }
}

text_record! {
    pub struct IndustryCard in IndustryCards, placeholder title = "New Industry" {
        title: "title", "Title", Text, true;
        description: "description", "Description", LongText, false;
        image_url: "imageUrl", "Image", ImageUrl, true;
    }
}

text_record! {
    pub struct TechnologyCard in TechnologyCards, placeholder name = "New Technology" {
        name: "name", "Name", Text, true;
        icon: "icon", "Icon", Icon, true;
        category: "category", "Category", Text, false;
    }
}

text_record! {
    pub struct QualityIndustryCard in QualityIndustry, placeholder title = "New Quality Card" {
        title: "title", "Title", Text, true;
        description: "description", "Description", LongText, false;
        image_url: "imageUrl", "Image", ImageUrl, false;
    }
}

text_record! {
    /// Service row inside the digital quality composite section
    pub struct DigitalService in QualityDigital, placeholder title = "New Digital Service" {
        title: "title", "Title", Text, true;
        description: "description", "Description", LongText, false;
        icon: "icon", "Icon", Icon, false;
    }
}

text_record! {
    /// Card on the homepage blog strip
    pub struct BlogPostCard in BlogPosts, placeholder title = "New Post" {
        title: "title", "Title", Text, true;
        slug: "slug", "Slug", Text, true;
        excerpt: "excerpt", "Excerpt", LongText, false;
        image_url: "imageUrl", "Cover image", ImageUrl, false;
        published_on: "publishedOn", "Published on", Text, false;
    }
}

// ========================
// Testimonial
// ========================

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

fn default_rating() -> u8 {
    MAX_RATING
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default)]
    pub order: u32,
}

impl Ordered for Testimonial {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl SectionRecord for Testimonial {
    const SECTION: SectionKind = SectionKind::Testimonials;

    fn placeholder(order: u32) -> Self {
        Self {
            id: None,
            name: "New Testimonial".to_string(),
            role: String::new(),
            company: String::new(),
            quote: String::new(),
            avatar_url: String::new(),
            rating: default_rating(),
            order,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec { name: "name", label: "Name", kind: FieldKind::Text, required: true },
            FieldSpec { name: "role", label: "Role", kind: FieldKind::Text, required: false },
            FieldSpec { name: "company", label: "Company", kind: FieldKind::Text, required: false },
            FieldSpec { name: "quote", label: "Quote", kind: FieldKind::LongText, required: true },
            FieldSpec { name: "avatarUrl", label: "Avatar", kind: FieldKind::ImageUrl, required: false },
            FieldSpec { name: "rating", label: "Rating (1-5)", kind: FieldKind::Number, required: true },
        ];
        FIELDS
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "role" => Some(self.role.clone()),
            "company" => Some(self.company.clone()),
            "quote" => Some(self.quote.clone()),
            "avatarUrl" => Some(self.avatar_url.clone()),
            "rating" => Some(self.rating.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "name" => self.name = value.to_string(),
            "role" => self.role = value.to_string(),
            "company" => self.company = value.to_string(),
            "quote" => self.quote = value.to_string(),
            "avatarUrl" => self.avatar_url = value.to_string(),
            "rating" => {
                let rating: u8 = value
                    .trim()
                    .parse()
                    .map_err(|_| FieldError::invalid(name, "must be a whole number"))?;
                if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                    return Err(FieldError::invalid(
                        name,
                        format!("must be between {} and {}", MIN_RATING, MAX_RATING),
                    ));
                }
                self.rating = rating;
            }
            _ => return Err(FieldError::Unknown(name.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "quote", &self.quote);
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            errors.push("rating", format!("must be between {} and {}", MIN_RATING, MAX_RATING));
        }
        errors.into_result()
    }
}

// ========================
// Pricing
// ========================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    /// Display price, e.g. "$499" or "Custom"
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub order: u32,
}

impl Ordered for PricingPlan {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl SectionRecord for PricingPlan {
    const SECTION: SectionKind = SectionKind::Pricing;

    fn placeholder(order: u32) -> Self {
        Self {
            name: "New Plan".to_string(),
            period: "per month".to_string(),
            order,
            ..Default::default()
        }
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec { name: "name", label: "Plan name", kind: FieldKind::Text, required: true },
            FieldSpec { name: "price", label: "Price", kind: FieldKind::Text, required: true },
            FieldSpec { name: "period", label: "Billing period", kind: FieldKind::Text, required: false },
            FieldSpec { name: "features", label: "Features (one per line)", kind: FieldKind::Lines, required: false },
            FieldSpec { name: "highlighted", label: "Highlight", kind: FieldKind::Toggle, required: false },
        ];
        FIELDS
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "price" => Some(self.price.clone()),
            "period" => Some(self.period.clone()),
            "features" => Some(self.features.join("\n")),
            "highlighted" => Some(self.highlighted.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "name" => self.name = value.to_string(),
            "price" => self.price = value.to_string(),
            "period" => self.period = value.to_string(),
            "features" => {
                self.features = value
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "highlighted" => {
                self.highlighted = match value.trim() {
                    "true" | "on" | "1" => true,
                    "false" | "off" | "0" | "" => false,
                    _ => return Err(FieldError::invalid(name, "must be true or false")),
                };
            }
            _ => return Err(FieldError::Unknown(name.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_record_wire_names() {
        let mut card = ServiceCard::placeholder(3);
        card.image_url = "/img/cloud.png".to_string();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["title"], "New Item");
        assert_eq!(json["imageUrl"], "/img/cloud.png");
        assert_eq!(json["order"], 3);
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_persisted_id_uses_underscore_key() {
        let card: IndustryCard = serde_json::from_str(
            r#"{"_id":"42","title":"Retail","imageUrl":"/r.png","order":0}"#,
        )
        .unwrap();
        assert_eq!(card.id(), Some("42"));
        assert_eq!(card.description, "");
    }

    #[test]
    fn test_set_field_by_wire_name() {
        let mut slide = HeroSlide::placeholder(0);
        slide.set_field("ctaLink", "/contact").unwrap();
        assert_eq!(slide.cta_link, "/contact");
        assert_eq!(
            slide.set_field("cta_link", "/x"),
            Err(FieldError::Unknown("cta_link".to_string()))
        );
    }

    #[test]
    fn test_required_fields_from_spec_table() {
        let mut tech = TechnologyCard::placeholder(0);
        let errors = tech.validate().unwrap_err();
        assert_eq!(errors.message_for("icon"), Some("is required"));
        tech.icon = "rust".to_string();
        assert!(tech.validate().is_ok());
    }

    #[test]
    fn test_testimonial_rating_coercion() {
        let mut t = Testimonial::placeholder(0);
        t.set_field("rating", " 4 ").unwrap();
        assert_eq!(t.rating, 4);
        assert!(t.set_field("rating", "six").is_err());
        assert!(t.set_field("rating", "0").is_err());
        assert_eq!(t.rating, 4);
    }

    #[test]
    fn test_testimonial_missing_rating_defaults_to_max() {
        let t: Testimonial = serde_json::from_str(r#"{"name":"Ana","quote":"Great"}"#).unwrap();
        assert_eq!(t.rating, MAX_RATING);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_pricing_features_split_on_lines() {
        let mut plan = PricingPlan::placeholder(0);
        plan.set_field("features", "24/7 support\n\n  SLA  \n").unwrap();
        assert_eq!(plan.features, vec!["24/7 support", "SLA"]);
        assert_eq!(plan.field("features").unwrap(), "24/7 support\nSLA");
        plan.set_field("highlighted", "true").unwrap();
        assert!(plan.highlighted);
        assert!(plan.set_field("highlighted", "maybe").is_err());
    }

    #[test]
    fn test_caption_falls_back_when_blank() {
        let mut card = ItCard::placeholder(0);
        assert_eq!(card.caption(), "New IT Card");
        card.title.clear();
        assert_eq!(card.caption(), "(untitled)");
    }

    #[test]
    fn test_map_images_touches_only_image_fields() {
        let mut card = ServiceCard::placeholder(0);
        card.image_url = "a.png".to_string();
        card.icon = "cloud".to_string();
        card.map_images(&|path| format!("https://cdn.example.com/{}", path));
        assert_eq!(card.image_url, "https://cdn.example.com/a.png");
        assert_eq!(card.icon, "cloud");
    }
}
