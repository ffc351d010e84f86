//! CrudService and FavoriteService over the safe SQL builder.

mod crud;
mod favorites;
mod validation;
pub use crud::CrudService;
pub use favorites::FavoriteService;
pub use validation::RequestValidator;
