//! Section Payloads
//!
//! Tagged boundary type for the replace-all endpoint. Each variant carries
//! the full collection of one section; the backend validates it on entry
//! and stores it as one row per record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::home::{HomePage, QualityDigitalSection};
use crate::order::{is_dense, renumber};
use crate::record::{validate_all, SectionRecord};
use crate::section::SectionKind;
use crate::sections::{
    BlogPostCard, DigitalService, HeroSlide, IndustryCard, ItCard, PricingPlan,
    QualityIndustryCard, ServiceCard, TechnologyCard, Testimonial,
};
use crate::validation::{require, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "items", rename_all = "kebab-case")]
pub enum SectionPayload {
    HeroSlides(Vec<HeroSlide>),
    Services(Vec<ServiceCard>),
    ItCards(Vec<ItCard>),
    IndustryCards(Vec<IndustryCard>),
    TechnologyCards(Vec<TechnologyCard>),
    QualityIndustry(Vec<QualityIndustryCard>),
    QualityDigital(QualityDigitalSection),
    Testimonials(Vec<Testimonial>),
    Pricing(Vec<PricingPlan>),
    BlogPosts(Vec<BlogPostCard>),
}

/// One stored record: persisted id plus its content without `_id`/`order`
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub id: Option<String>,
    pub body: Value,
}

/// Split records into stored rows; position in the vec is the order
pub fn to_rows<T: SectionRecord>(items: &[T]) -> Result<Vec<StoredRow>, serde_json::Error> {
    items
        .iter()
        .map(|item| {
            let mut body = serde_json::to_value(item)?;
            if let Value::Object(map) = &mut body {
                map.remove("_id");
                map.remove("order");
            }
            Ok(StoredRow {
                id: item.id().map(str::to_string),
                body,
            })
        })
        .collect()
}

/// Rebuild records from stored rows, taking order from row position
pub fn from_rows<T: SectionRecord>(rows: Vec<StoredRow>) -> Result<Vec<T>, serde_json::Error> {
    rows.into_iter()
        .enumerate()
        .map(|(position, row)| {
            let mut map = match row.body {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            if let Some(id) = row.id {
                map.insert("_id".to_string(), Value::String(id));
            }
            map.insert("order".to_string(), Value::from(position as u64));
            serde_json::from_value(Value::Object(map))
        })
        .collect()
}

macro_rules! each_list_variant {
    ($payload:expr, $items:ident => $body:expr, $digital:ident => $digital_body:expr) => {
        match $payload {
            SectionPayload::HeroSlides($items) => $body,
            SectionPayload::Services($items) => $body,
            SectionPayload::ItCards($items) => $body,
            SectionPayload::IndustryCards($items) => $body,
            SectionPayload::TechnologyCards($items) => $body,
            SectionPayload::QualityIndustry($items) => $body,
            SectionPayload::Testimonials($items) => $body,
            SectionPayload::Pricing($items) => $body,
            SectionPayload::BlogPosts($items) => $body,
            SectionPayload::QualityDigital($digital) => $digital_body,
        }
    };
}

impl SectionPayload {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionPayload::HeroSlides(_) => SectionKind::HeroSlides,
            SectionPayload::Services(_) => SectionKind::Services,
            SectionPayload::ItCards(_) => SectionKind::ItCards,
            SectionPayload::IndustryCards(_) => SectionKind::IndustryCards,
            SectionPayload::TechnologyCards(_) => SectionKind::TechnologyCards,
            SectionPayload::QualityIndustry(_) => SectionKind::QualityIndustry,
            SectionPayload::QualityDigital(_) => SectionKind::QualityDigital,
            SectionPayload::Testimonials(_) => SectionKind::Testimonials,
            SectionPayload::Pricing(_) => SectionKind::Pricing,
            SectionPayload::BlogPosts(_) => SectionKind::BlogPosts,
        }
    }

    /// Empty collection for a section
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::HeroSlides => SectionPayload::HeroSlides(Vec::new()),
            SectionKind::Services => SectionPayload::Services(Vec::new()),
            SectionKind::ItCards => SectionPayload::ItCards(Vec::new()),
            SectionKind::IndustryCards => SectionPayload::IndustryCards(Vec::new()),
            SectionKind::TechnologyCards => SectionPayload::TechnologyCards(Vec::new()),
            SectionKind::QualityIndustry => SectionPayload::QualityIndustry(Vec::new()),
            SectionKind::QualityDigital => {
                SectionPayload::QualityDigital(QualityDigitalSection::default())
            }
            SectionKind::Testimonials => SectionPayload::Testimonials(Vec::new()),
            SectionKind::Pricing => SectionPayload::Pricing(Vec::new()),
            SectionKind::BlogPosts => SectionPayload::BlogPosts(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        each_list_variant!(self, items => items.len(), digital => digital.services.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renumber `order` to match array position
    pub fn normalize(&mut self) {
        each_list_variant!(self, items => renumber(items), digital => renumber(&mut digital.services))
    }

    pub fn is_dense(&self) -> bool {
        each_list_variant!(self, items => is_dense(items), digital => is_dense(&digital.services))
    }

    /// Required-field check for every record (and the composite heading)
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        each_list_variant!(self, items => validate_all(items), digital => {
            let mut errors = ValidationErrors::new();
            require(&mut errors, "heading", &digital.heading);
            if let Err(service_errors) = validate_all(&digital.services) {
                errors.extend(service_errors);
            }
            errors.into_result()
        })
    }

    /// Stored rows for the ordered part of the payload
    pub fn rows(&self) -> Result<Vec<StoredRow>, serde_json::Error> {
        each_list_variant!(self, items => to_rows(items), digital => to_rows(&digital.services))
    }

    /// Rebuild a payload from stored rows.
    ///
    /// The digital quality heading block is stored separately; it comes back
    /// empty here and the caller applies it.
    pub fn from_rows(kind: SectionKind, rows: Vec<StoredRow>) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            SectionKind::HeroSlides => SectionPayload::HeroSlides(from_rows(rows)?),
            SectionKind::Services => SectionPayload::Services(from_rows(rows)?),
            SectionKind::ItCards => SectionPayload::ItCards(from_rows(rows)?),
            SectionKind::IndustryCards => SectionPayload::IndustryCards(from_rows(rows)?),
            SectionKind::TechnologyCards => SectionPayload::TechnologyCards(from_rows(rows)?),
            SectionKind::QualityIndustry => SectionPayload::QualityIndustry(from_rows(rows)?),
            SectionKind::QualityDigital => {
                SectionPayload::QualityDigital(QualityDigitalSection {
                    services: from_rows(rows)?,
                    ..Default::default()
                })
            }
            SectionKind::Testimonials => SectionPayload::Testimonials(from_rows(rows)?),
            SectionKind::Pricing => SectionPayload::Pricing(from_rows(rows)?),
            SectionKind::BlogPosts => SectionPayload::BlogPosts(from_rows(rows)?),
        })
    }

    /// Copy this section into the aggregated homepage document
    pub fn apply_to(self, home: &mut HomePage) {
        match self {
            SectionPayload::HeroSlides(items) => home.hero_slides = items,
            SectionPayload::Services(items) => home.services = items,
            SectionPayload::ItCards(items) => home.it_cards = items,
            SectionPayload::IndustryCards(items) => home.industry_cards = items,
            SectionPayload::TechnologyCards(items) => home.technology_cards = items,
            SectionPayload::QualityIndustry(items) => home.quality_industry = items,
            SectionPayload::QualityDigital(section) => home.quality_digital = section,
            SectionPayload::Testimonials(items) => home.testimonials = items,
            SectionPayload::Pricing(items) => home.pricing = items,
            SectionPayload::BlogPosts(items) => home.blog_posts = items,
        }
    }
}

/// A record type whose whole section is a plain ordered list
pub trait ListSection: SectionRecord {
    fn wrap(items: Vec<Self>) -> SectionPayload;

    /// `None` when the payload belongs to another section
    fn unwrap(payload: SectionPayload) -> Option<Vec<Self>>;

    /// Seed data for this section from the aggregated document
    fn from_home(home: &HomePage) -> Vec<Self>;
}

macro_rules! list_section {
    ($($record:ty => $variant:ident, $home_field:ident;)+) => {
        $(
            impl ListSection for $record {
                fn wrap(items: Vec<Self>) -> SectionPayload {
                    SectionPayload::$variant(items)
                }

                fn unwrap(payload: SectionPayload) -> Option<Vec<Self>> {
                    match payload {
                        SectionPayload::$variant(items) => Some(items),
                        _ => None,
                    }
                }

                fn from_home(home: &HomePage) -> Vec<Self> {
                    home.$home_field.clone()
                }
            }
        )+
    };
}

list_section! {
    HeroSlide => HeroSlides, hero_slides;
    ServiceCard => Services, services;
    ItCard => ItCards, it_cards;
    IndustryCard => IndustryCards, industry_cards;
    TechnologyCard => TechnologyCards, technology_cards;
    QualityIndustryCard => QualityIndustry, quality_industry;
    Testimonial => Testimonials, testimonials;
    PricingPlan => Pricing, pricing;
    BlogPostCard => BlogPosts, blog_posts;
}

/// Digital services travel inside the composite; this only exposes the list
pub fn digital_services(home: &HomePage) -> Vec<DigitalService> {
    home.quality_digital.services.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, order: u32) -> ServiceCard {
        ServiceCard {
            id: None,
            title: title.to_string(),
            description: format!("{} description", title),
            icon: String::new(),
            image_url: String::new(),
            order,
        }
    }

    #[test]
    fn test_tagged_wire_shape() {
        let payload = SectionPayload::Services(vec![card("Cloud", 0)]);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["section"], "services");
        assert_eq!(json["items"][0]["title"], "Cloud");

        let composite = SectionPayload::QualityDigital(QualityDigitalSection {
            heading: "Digital".into(),
            ..Default::default()
        });
        let json = serde_json::to_value(&composite).unwrap();
        assert_eq!(json["section"], "quality-digital");
        assert_eq!(json["items"]["heading"], "Digital");
    }

    #[test]
    fn test_unknown_section_tag_is_rejected() {
        let result: Result<SectionPayload, _> =
            serde_json::from_str(r#"{"section":"footer","items":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rows_strip_identity_and_order() {
        let mut first = card("A", 0);
        first.id = Some("7".into());
        let rows = to_rows(&[first, card("B", 1)]).unwrap();
        assert_eq!(rows[0].id.as_deref(), Some("7"));
        assert!(rows[0].body.get("_id").is_none());
        assert!(rows[0].body.get("order").is_none());
        assert_eq!(rows[1].id, None);
    }

    #[test]
    fn test_from_rows_assigns_position_as_order() {
        let rows = vec![
            StoredRow { id: Some("3".into()), body: serde_json::json!({"title": "X", "description": "d"}) },
            StoredRow { id: Some("1".into()), body: serde_json::json!({"title": "Y", "description": "d"}) },
        ];
        let items: Vec<ServiceCard> = from_rows(rows).unwrap();
        assert_eq!(items[0].order, 0);
        assert_eq!(items[1].order, 1);
        assert_eq!(items[1].id.as_deref(), Some("1"));
    }

    #[test]
    fn test_validate_scopes_item_errors() {
        let mut blank = card("", 1);
        blank.description.clear();
        let payload = SectionPayload::Services(vec![card("A", 0), blank]);
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.message_for("items[1].title"), Some("is required"));
        assert_eq!(errors.message_for("items[1].description"), Some("is required"));
    }

    #[test]
    fn test_normalize_makes_dense() {
        let mut payload = SectionPayload::Services(vec![card("A", 5), card("B", 5)]);
        assert!(!payload.is_dense());
        payload.normalize();
        assert!(payload.is_dense());
    }

    #[test]
    fn test_list_section_wrap_unwrap() {
        let payload = ServiceCard::wrap(vec![card("A", 0)]);
        assert_eq!(payload.kind(), SectionKind::Services);
        assert!(ItCard::unwrap(payload.clone()).is_none());
        assert_eq!(ServiceCard::unwrap(payload).unwrap().len(), 1);
    }

    #[test]
    fn test_apply_to_home_replaces_section() {
        let mut home = HomePage::default();
        home.services = vec![card("Old", 0), card("Older", 1)];
        SectionPayload::Services(vec![card("New", 0)]).apply_to(&mut home);
        assert_eq!(home.services.len(), 1);
        assert_eq!(ServiceCard::from_home(&home)[0].title, "New");
    }
}
