pub mod catalogue;
pub mod source;
pub mod tmdb;

pub use catalogue::{find_by_id, recommend, Catalogue};
pub use source::CatalogueSource;
pub use tmdb::TmdbClient;
