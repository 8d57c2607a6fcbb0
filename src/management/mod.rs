mod genre;

pub use genre::GenreIndex;
