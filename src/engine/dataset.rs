//! Catalog loading from the TMDb CSV export.

use std::io::Read;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, RawMovieRow},
};

use super::features::{combine_features, normalize_genres, top_cast};

/// Ordered, immutable movie list. Position `i` is row `i` of the term matrix.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieRecord> {
        self.movies.iter()
    }

    pub fn find_by_id(&self, id: u64) -> Option<&MovieRecord> {
        self.movies.iter().find(|movie| movie.id == id)
    }
}

impl From<RawMovieRow> for MovieRecord {
    fn from(row: RawMovieRow) -> Self {
        let genres = normalize_genres(row.genres.as_deref());
        let cast = top_cast(row.cast.as_deref());
        let director = row.director.unwrap_or_default();
        let keywords = row.keywords.unwrap_or_default();
        let combined_features = combine_features(&genres, &cast, &director, &keywords);

        MovieRecord {
            id: row.id,
            title: row.original_title.unwrap_or_default(),
            genres,
            cast,
            director,
            keywords,
            combined_features,
        }
    }
}

/// Reads the catalog CSV at `path`
pub fn load(path: impl AsRef<Path>) -> AppResult<Catalog> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading movie catalog");

    let file = std::fs::File::open(path).map_err(|e| {
        AppError::DatasetUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;

    let catalog = from_reader(file)?;

    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "Movie catalog is empty");
    } else {
        tracing::info!(movies = catalog.len(), "Movie catalog loaded");
    }

    Ok(catalog)
}

/// Parses catalog CSV from any reader; one malformed row fails the whole load
pub fn from_reader<R: Read>(reader: R) -> AppResult<Catalog> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut movies = Vec::new();

    for (line, result) in reader.deserialize::<RawMovieRow>().enumerate() {
        let row = result.map_err(|e| {
            AppError::DatasetUnavailable(format!("malformed record {}: {}", line + 1, e))
        })?;
        movies.push(MovieRecord::from(row));
    }

    Ok(Catalog::new(movies))
}
