pub mod genre;
pub mod movie;
pub mod user;

pub use genre::Genre;
pub use movie::{Movie, MovieList, MovieResponse};
pub use user::{FavoriteMovie, UserPreferences};
