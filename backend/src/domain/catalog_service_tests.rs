//! Tests for the catalog service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::catalog::{ComponentId, Description, Price, ThumbnailUrl, Title};
use crate::domain::ports::{MockCategoryRepository, MockComponentRepository};

fn service(
    categories: MockCategoryRepository,
    components: MockComponentRepository,
) -> CatalogService {
    CatalogService::new(Arc::new(categories), Arc::new(components))
}

fn category(name: &str) -> Category {
    Category::new(
        CategoryId::random(),
        CategoryName::new(name).expect("valid name"),
    )
}

fn new_component(category_ids: Vec<CategoryId>) -> NewComponent {
    NewComponent {
        title: Title::new("Tire 225/45R17").expect("valid title"),
        description: Description::new("All-season tire").expect("valid description"),
        price: Price::new(550.0).expect("valid price"),
        url_thumbnail: ThumbnailUrl::new("https://cdn.example.com/tire.png").expect("valid url"),
        category_ids,
    }
}

fn component_from(record: NewComponentRecord) -> Component {
    Component::new(
        ComponentId::random(),
        record.title,
        record.description,
        record.price,
        record.url_thumbnail,
        record.categories,
    )
}

#[tokio::test]
async fn create_category_passes_the_normalised_name_to_the_gateway() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_create()
        .withf(|new| new.name.as_str() == "TIRES")
        .times(1)
        .returning(|new| Ok(Category::new(CategoryId::random(), new.name.clone())));

    let created = service(categories, MockComponentRepository::new())
        .create_category(CategoryName::new("tires").expect("valid name"))
        .await
        .expect("category created");
    assert_eq!(created.name().as_str(), "TIRES");
}

#[tokio::test]
async fn create_category_maps_the_gateway_duplicate_to_a_conflict() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_create()
        .times(1)
        .return_once(|_| Err(CategoryRepositoryError::DuplicateName));

    let err = service(categories, MockComponentRepository::new())
        .create_category(CategoryName::new("TIRES").expect("valid name"))
        .await
        .expect_err("duplicate category");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("category_already_exists"))
    );
}

#[tokio::test]
async fn create_component_fails_when_any_category_is_missing_and_creates_nothing() {
    let existing = category("TIRES");
    let existing_id = existing.id();
    let missing_id = CategoryId::random();

    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_ids()
        .times(1)
        .return_once(move |_| Ok(vec![existing]));
    let mut components = MockComponentRepository::new();
    components.expect_create().times(0);

    let err = service(categories, components)
        .create_component(new_component(vec![existing_id, missing_id]))
        .await
        .expect_err("missing category");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("category_does_not_exist"))
    );
    assert_eq!(
        err.details().and_then(|d| d.get("missingIds")),
        Some(&serde_json::json!([missing_id.to_string()]))
    );
}

#[tokio::test]
async fn create_component_persists_only_after_the_full_set_is_confirmed() {
    let first = category("TIRES");
    let second = category("CARS");
    let requested = vec![first.id(), second.id()];
    let resolved = vec![first, second];

    let mut categories = MockCategoryRepository::new();
    let returned = resolved.clone();
    categories
        .expect_find_by_ids()
        .withf(move |ids| ids == requested.as_slice())
        .times(1)
        .return_once(move |_| Ok(returned));
    let mut components = MockComponentRepository::new();
    components
        .expect_create()
        .withf(|record| record.categories.len() == 2)
        .times(1)
        .returning(|record| Ok(component_from(record)));

    let ids = resolved.iter().map(Category::id).collect();
    let created = service(categories, components)
        .create_component(new_component(ids))
        .await
        .expect("component created");
    assert_eq!(created.categories().len(), 2);
}

#[tokio::test]
async fn find_all_components_passes_the_page_window_through() {
    let mut components = MockComponentRepository::new();
    components
        .expect_find_page()
        .withf(|query| {
            query.page.page() == 1 && query.page.limit() == 10 && query.title.is_none()
        })
        .times(1)
        .return_once(|query| Ok(Page::empty(query.page)));

    let page = service(MockCategoryRepository::new(), components)
        .find_all_components(PageRequest::defaults(), None)
        .await
        .expect("page");
    assert_eq!(page.total, 0);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
}

#[tokio::test]
async fn gateway_failures_surface_as_internal_errors() {
    let mut categories = MockCategoryRepository::new();
    categories.expect_find_all().times(1).return_once(|| {
        Err(CategoryRepositoryError::Query {
            message: "boom".to_owned(),
        })
    });

    let err = service(categories, MockComponentRepository::new())
        .find_all_categories()
        .await
        .expect_err("gateway failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
