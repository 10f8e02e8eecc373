//! Development seed data, behind the `example-data` cargo feature.
//!
//! Seeds one administrator, one PRO account, a handful of categories,
//! and a sample component so a fresh instance is explorable immediately.
//! Seeding is idempotent: duplicate conflicts from earlier runs are
//! ignored.

use tracing::info;

use crate::domain::catalog::{CategoryName, Description, Price, ThumbnailUrl, Title};
use crate::domain::error::Error;
use crate::domain::password::PasswordHasher;
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ComponentRepository, NewCategory,
    NewComponentRecord, UserRepository, UserRepositoryError,
};
use crate::domain::user::{Email, NewUser, Role, UserName};

const SEED_USERS: &[(&str, &str, &str, Role)] = &[
    ("Catalogue Admin", "admin@example.com", "admin", Role::Admin),
    ("Catalogue Pro", "pro@example.com", "userpro", Role::Pro),
];

const SEED_CATEGORIES: &[&str] = &["TIRES", "CARS", "LEISURE"];

/// Seed demonstration accounts and catalogue records.
///
/// Passwords are hashed with the supplied hasher, exactly as signup
/// would have done; the gateway never sees plaintext.
pub async fn seed_example_data(
    users: &dyn UserRepository,
    categories: &dyn CategoryRepository,
    components: &dyn ComponentRepository,
    hasher: &PasswordHasher,
) -> Result<(), Error> {
    for (name, email, password, role) in SEED_USERS {
        let password_hash = hasher
            .hash(password)
            .map_err(|err| Error::internal(format!("seed hashing failed: {err}")))?;
        let new_user = NewUser {
            name: UserName::new(*name).map_err(seed_invalid)?,
            email: Email::new(*email).map_err(seed_invalid)?,
            role: *role,
            password_hash,
        };
        match users.create(new_user).await {
            Ok(identity) => info!(user_id = %identity.id(), email = %email, "seeded account"),
            Err(UserRepositoryError::DuplicateEmail) => {}
            Err(err) => return Err(Error::internal(format!("seeding user failed: {err}"))),
        }
    }

    let mut tire_category = None;
    for name in SEED_CATEGORIES {
        let new_category = NewCategory {
            name: CategoryName::new(*name).map_err(seed_invalid)?,
        };
        match categories.create(new_category).await {
            Ok(category) => {
                if category.name().as_str() == "TIRES" {
                    tire_category = Some(category);
                }
            }
            Err(CategoryRepositoryError::DuplicateName) => {}
            Err(err) => return Err(Error::internal(format!("seeding category failed: {err}"))),
        }
    }

    // The sample component only exists on first boot; a duplicate run has
    // no TIRES category to hand because creation conflicted above.
    if let Some(category) = tire_category {
        let component = NewComponentRecord {
            title: Title::new("Tire 225/45R17").map_err(seed_invalid)?,
            description: Description::new("All-season 225/45R17 car tire").map_err(seed_invalid)?,
            price: Price::new(550.0).map_err(seed_invalid)?,
            url_thumbnail: ThumbnailUrl::new("https://cdn.example.com/thumbs/tire-225-45r17.png")
                .map_err(seed_invalid)?,
            categories: vec![category],
        };
        components
            .create(component)
            .await
            .map_err(|err| Error::internal(format!("seeding component failed: {err}")))?;
    }

    info!("example data seeded");
    Ok(())
}

fn seed_invalid(err: impl std::fmt::Display) -> Error {
    Error::internal(format!("seed record is invalid: {err}"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::outbound::persistence::{
        InMemoryCategoryRepository, InMemoryComponentRepository, InMemoryUserRepository,
    };
    use crate::domain::ports::ComponentQuery;
    use pagination::PageRequest;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn seeding_populates_accounts_categories_and_a_component() {
        let users = InMemoryUserRepository::new();
        let categories = InMemoryCategoryRepository::new();
        let components = InMemoryComponentRepository::new();
        let hasher = PasswordHasher::new(TEST_COST);

        seed_example_data(&users, &categories, &components, &hasher)
            .await
            .expect("seeding succeeds");

        let admin = users
            .find_by_email(&Email::new("admin@example.com").expect("valid email"), true)
            .await
            .expect("lookup")
            .expect("admin present");
        assert_eq!(admin.role, Role::Admin);
        let hash = admin.password_hash.expect("hash stored");
        assert_ne!(hash.as_str(), "admin");

        let all = categories.find_all().await.expect("categories");
        let names: Vec<&str> = all.iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, vec!["CARS", "LEISURE", "TIRES"]);

        let page = components
            .find_page(ComponentQuery {
                page: PageRequest::defaults(),
                title: None,
            })
            .await
            .expect("components");
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let users = InMemoryUserRepository::new();
        let categories = InMemoryCategoryRepository::new();
        let components = InMemoryComponentRepository::new();
        let hasher = PasswordHasher::new(TEST_COST);

        seed_example_data(&users, &categories, &components, &hasher)
            .await
            .expect("first run");
        seed_example_data(&users, &categories, &components, &hasher)
            .await
            .expect("second run");

        let page = components
            .find_page(ComponentQuery {
                page: PageRequest::defaults(),
                title: None,
            })
            .await
            .expect("components");
        assert_eq!(page.total, 1, "the sample component is not duplicated");
    }
}
