//! Persistence gateway ports for the hexagonal boundary.
//!
//! The core consumes durable storage through these traits and never
//! learns which engine sits behind them. Each port carries its own
//! error enum; services translate the expected conflict/not-found
//! variants into named domain errors and let everything else surface as
//! an internal error.

mod category_repository;
mod component_repository;
mod user_repository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError, NewCategory};
#[cfg(test)]
pub use component_repository::MockComponentRepository;
pub use component_repository::{
    ComponentQuery, ComponentRepository, ComponentRepositoryError, NewComponentRecord,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
