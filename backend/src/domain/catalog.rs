//! Catalogue taxonomy and item entities.
//!
//! Categories are the taxonomy, components the items. The one
//! referential-integrity rule the core enforces — a component may only
//! reference categories that exist — lives in
//! [`crate::domain::catalog_service`]; this module owns the validated
//! value types those rules operate on.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the catalogue value-type constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogValidationError {
    /// A category id was not a valid UUID.
    #[error("category id must be a valid UUID")]
    InvalidCategoryId,
    /// Category name was missing or blank once trimmed.
    #[error("category name must not be empty")]
    EmptyCategoryName,
    /// Title was missing or blank once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Description was missing or blank once trimmed.
    #[error("description must not be empty")]
    EmptyDescription,
    /// Price was negative or not a finite number.
    #[error("price must be a finite, non-negative number")]
    InvalidPrice,
    /// Thumbnail was not an absolute URL.
    #[error("thumbnail must be a valid URL")]
    InvalidThumbnailUrl,
}

/// Stable category identifier, assigned by the persistence gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "0e4dbf38-6d0e-4b2f-9f3c-1a2b3c4d5e6f")]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, CatalogValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| CatalogValidationError::InvalidCategoryId)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable component identifier, assigned by the persistence gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
pub struct ComponentId(Uuid);

impl ComponentId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category name, normalised to upper-case on construction.
///
/// ## Invariants
/// - Non-blank once trimmed.
/// - Always stored upper-cased, so the gateway's uniqueness rule and any
///   duplicate check see the same spelling regardless of caller casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "TIRES")]
pub struct CategoryName(String);

impl CategoryName {
    /// Validate, trim, and upper-case a raw name.
    pub fn new(raw: impl Into<String>) -> Result<Self, CatalogValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CatalogValidationError::EmptyCategoryName);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// The normalised name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CategoryName {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

/// Catalogue taxonomy entry; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
}

impl Category {
    /// Build a category from validated components.
    pub fn new(id: CategoryId, name: CategoryName) -> Self {
        Self { id, name }
    }

    /// Stable identifier.
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Normalised name.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }
}

/// Component title shown in listings; preserved as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Tire 225/45R17")]
pub struct Title(String);

impl Title {
    /// Validate and construct a title; must be non-blank once trimmed.
    pub fn new(raw: impl Into<String>) -> Result<Self, CatalogValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CatalogValidationError::EmptyTitle);
        }
        Ok(Self(raw))
    }

    /// The title as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Title {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

/// Free-form component description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String)]
pub struct Description(String);

impl Description {
    /// Validate and construct a description; must be non-blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, CatalogValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CatalogValidationError::EmptyDescription);
        }
        Ok(Self(raw))
    }

    /// The description as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Description {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

/// Non-negative component price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "f64", into = "f64")]
#[schema(value_type = f64, example = 550.0)]
pub struct Price(f64);

impl Price {
    /// Validate and construct a price; must be finite and non-negative.
    pub fn new(value: f64) -> Result<Self, CatalogValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogValidationError::InvalidPrice);
        }
        Ok(Self(value))
    }

    /// The price as a plain number.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = CatalogValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Thumbnail location; must parse as an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "https://cdn.example.com/thumbs/tire.png")]
pub struct ThumbnailUrl(String);

impl ThumbnailUrl {
    /// Validate and construct a thumbnail URL; the original string is
    /// preserved rather than the parser's normalised form.
    pub fn new(raw: impl Into<String>) -> Result<Self, CatalogValidationError> {
        let raw = raw.into();
        Url::parse(&raw).map_err(|_| CatalogValidationError::InvalidThumbnailUrl)?;
        Ok(Self(raw))
    }

    /// The URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ThumbnailUrl {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThumbnailUrl> for String {
    fn from(value: ThumbnailUrl) -> Self {
        value.0
    }
}

/// Catalogue item with its resolved category associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    id: ComponentId,
    title: Title,
    description: Description,
    price: Price,
    url_thumbnail: ThumbnailUrl,
    categories: Vec<Category>,
}

impl Component {
    /// Build a component from validated parts.
    pub fn new(
        id: ComponentId,
        title: Title,
        description: Description,
        price: Price,
        url_thumbnail: ThumbnailUrl,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            price,
            url_thumbnail,
            categories,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Listing title.
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Free-form description.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Thumbnail location.
    pub fn url_thumbnail(&self) -> &ThumbnailUrl {
        &self.url_thumbnail
    }

    /// Categories this component belongs to; order is irrelevant.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// Payload for creating a component, referencing categories by id.
///
/// The ids are resolved — and must all exist — before anything is
/// persisted; see [`crate::domain::catalog_service`].
#[derive(Debug, Clone)]
pub struct NewComponent {
    /// Listing title.
    pub title: Title,
    /// Free-form description.
    pub description: Description,
    /// Price.
    pub price: Price,
    /// Thumbnail location.
    pub url_thumbnail: ThumbnailUrl,
    /// Referenced category ids; duplicates count against the existence
    /// check and fail it.
    pub category_ids: Vec<CategoryId>,
}

/// Case-insensitive substring filter over component titles.
///
/// Blank input means "no filter" and yields `None`, mirroring the
/// query-string contract where an empty `title` is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFilter(String);

impl TitleFilter {
    /// Build a filter from raw input, returning `None` when the input is
    /// blank once trimmed.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    /// Whether `title` matches this filter.
    pub fn matches(&self, title: &Title) -> bool {
        title.as_str().to_lowercase().contains(&self.0)
    }

    /// The lower-cased needle.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tires", "TIRES")]
    #[case("  tires  ", "TIRES")]
    #[case("Léger", "LÉGER")]
    #[case("ALREADY", "ALREADY")]
    fn category_name_upper_cases_on_construction(#[case] raw: &str, #[case] expected: &str) {
        let name = CategoryName::new(raw).expect("valid name");
        assert_eq!(name.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn category_name_rejects_blank_input(#[case] raw: &str) {
        assert_eq!(
            CategoryName::new(raw).expect_err("invalid name"),
            CatalogValidationError::EmptyCategoryName
        );
    }

    #[rstest]
    #[case(-0.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn price_rejects_invalid_numbers(#[case] value: f64) {
        assert_eq!(
            Price::new(value).expect_err("invalid price"),
            CatalogValidationError::InvalidPrice
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(550.0)]
    fn price_accepts_non_negative_numbers(#[case] value: f64) {
        assert_eq!(Price::new(value).map(Price::value), Ok(value));
    }

    #[rstest]
    #[case("not a url")]
    #[case("/relative/path.png")]
    #[case("")]
    fn thumbnail_rejects_non_urls(#[case] raw: &str) {
        assert_eq!(
            ThumbnailUrl::new(raw).expect_err("invalid url"),
            CatalogValidationError::InvalidThumbnailUrl
        );
    }

    #[test]
    fn thumbnail_preserves_the_original_string() {
        let url = ThumbnailUrl::new("https://cdn.example.com/a.png").expect("valid url");
        assert_eq!(url.as_str(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn title_filter_is_case_insensitive() {
        let filter = TitleFilter::new("TiRe").expect("non-blank filter");
        let title = Title::new("Winter tIres 225/45R17").expect("valid title");
        assert!(filter.matches(&title));
    }

    #[test]
    fn title_filter_treats_blank_input_as_absent() {
        assert_eq!(TitleFilter::new(""), None);
        assert_eq!(TitleFilter::new("   "), None);
    }

    #[test]
    fn component_serialises_with_camel_case_thumbnail_field() {
        let component = Component::new(
            ComponentId::random(),
            Title::new("Tire").expect("valid title"),
            Description::new("A tire").expect("valid description"),
            Price::new(550.0).expect("valid price"),
            ThumbnailUrl::new("https://cdn.example.com/a.png").expect("valid url"),
            Vec::new(),
        );
        let value = serde_json::to_value(&component).expect("serialise component");
        assert!(value.get("urlThumbnail").is_some());
        assert!(value.get("url_thumbnail").is_none());
    }
}
