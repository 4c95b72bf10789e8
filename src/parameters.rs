//! Typed query parameters for the two supported searches
//!
//! Both parameter sets share the verbosity and episode switches; the
//! title search additionally carries year, type and paging fields.

use crate::movie::MovieType;

/// Requested detail level for a field of the response.
///
/// The remote service populates different keys depending on this value
/// (e.g. `plot` versus `plot_simple`), which the movie parser accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Abbreviated representation
    #[default]
    Simple,
    /// Complete representation
    Full,
}

impl Verbosity {
    /// Returns the query string value for this verbosity.
    pub const fn value(self) -> &'static str {
        match self {
            Verbosity::Simple => "simple",
            Verbosity::Full => "full",
        }
    }
}

/// Settings shared by every search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedOptions {
    /// Verbosity of the plot field
    pub plot: Verbosity,
    /// Verbosity of the "also known as" field
    pub aka: Verbosity,
    /// Verbosity of the release date field
    pub release: Verbosity,
    /// Whether episodes are included in the result
    pub include_episodes: bool,
}

impl Default for SharedOptions {
    fn default() -> Self {
        Self {
            plot: Verbosity::Simple,
            aka: Verbosity::Simple,
            release: Verbosity::Simple,
            include_episodes: true,
        }
    }
}

/// Parameters for looking up a single movie by its IMDb identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchByIdParameters {
    movie_id: String,
    /// Verbosity and episode switches
    pub options: SharedOptions,
}

impl SearchByIdParameters {
    /// Creates parameters for the given identifier (e.g. `tt1375666`).
    pub fn new(movie_id: impl Into<String>) -> Self {
        Self {
            movie_id: movie_id.into(),
            options: SharedOptions::default(),
        }
    }

    /// The identifier being searched for.
    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }

    /// Sets the plot verbosity.
    #[must_use]
    pub fn plot(mut self, verbosity: Verbosity) -> Self {
        self.options.plot = verbosity;
        self
    }

    /// Sets the "also known as" verbosity.
    #[must_use]
    pub fn aka(mut self, verbosity: Verbosity) -> Self {
        self.options.aka = verbosity;
        self
    }

    /// Sets the release date verbosity.
    #[must_use]
    pub fn release(mut self, verbosity: Verbosity) -> Self {
        self.options.release = verbosity;
        self
    }

    /// Sets whether episodes are included.
    #[must_use]
    pub fn include_episodes(mut self, include: bool) -> Self {
        self.options.include_episodes = include;
        self
    }
}

/// Parameters for searching movies by title.
///
/// Defaults: no year filter, [`MovieType::None`], offset 0 and limit 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchByTitleParameters {
    title: String,
    year: Option<i32>,
    movie_type: MovieType,
    offset: u32,
    limit: u32,
    /// Verbosity and episode switches
    pub options: SharedOptions,
}

impl SearchByTitleParameters {
    /// Creates parameters for the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            movie_type: MovieType::None,
            offset: 0,
            limit: 1,
            options: SharedOptions::default(),
        }
    }

    /// The title being searched for.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The release year filter, if any.
    pub fn year_filter(&self) -> Option<i32> {
        self.year
    }

    /// The title type filter.
    pub fn movie_type_filter(&self) -> MovieType {
        self.movie_type
    }

    /// Index of the first requested result.
    pub fn offset_value(&self) -> u32 {
        self.offset
    }

    /// Maximum number of requested results.
    pub fn limit_value(&self) -> u32 {
        self.limit
    }

    /// Restricts results to the given release year.
    #[must_use]
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Removes the year restriction.
    #[must_use]
    pub fn clear_year(mut self) -> Self {
        self.year = None;
        self
    }

    /// Restricts results to one kind of title.
    #[must_use]
    pub fn movie_type(mut self, movie_type: MovieType) -> Self {
        self.movie_type = movie_type;
        self
    }

    /// Sets the index of the first result.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the maximum number of results; values below 1 are raised to 1.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Sets the plot verbosity.
    #[must_use]
    pub fn plot(mut self, verbosity: Verbosity) -> Self {
        self.options.plot = verbosity;
        self
    }

    /// Sets the "also known as" verbosity.
    #[must_use]
    pub fn aka(mut self, verbosity: Verbosity) -> Self {
        self.options.aka = verbosity;
        self
    }

    /// Sets the release date verbosity.
    #[must_use]
    pub fn release(mut self, verbosity: Verbosity) -> Self {
        self.options.release = verbosity;
        self
    }

    /// Sets whether episodes are included.
    #[must_use]
    pub fn include_episodes(mut self, include: bool) -> Self {
        self.options.include_episodes = include;
        self
    }

    /// Copy of these parameters positioned on one page of results.
    pub(crate) fn page(&self, offset: u32, limit: u32) -> Self {
        self.clone().offset(offset).limit(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_defaults() {
        let params = SearchByTitleParameters::new("Inception");
        assert_eq!(params.title(), "Inception");
        assert_eq!(params.year_filter(), None);
        assert_eq!(params.movie_type_filter(), MovieType::None);
        assert_eq!(params.offset_value(), 0);
        assert_eq!(params.limit_value(), 1);
        assert_eq!(params.options, SharedOptions::default());
        assert!(params.options.include_episodes);
    }

    #[test]
    fn test_limit_is_at_least_one() {
        let params = SearchByTitleParameters::new("Inception").limit(0);
        assert_eq!(params.limit_value(), 1);
    }

    #[test]
    fn test_page_keeps_other_fields() {
        let params = SearchByTitleParameters::new("Alien")
            .year(1979)
            .plot(Verbosity::Full)
            .offset(3)
            .limit(20);
        let page = params.page(10, 5);
        assert_eq!(page.offset_value(), 10);
        assert_eq!(page.limit_value(), 5);
        assert_eq!(page.year_filter(), Some(1979));
        assert_eq!(page.options.plot, Verbosity::Full);
    }

    #[test]
    fn test_id_setters() {
        let params = SearchByIdParameters::new("tt0078748")
            .aka(Verbosity::Full)
            .include_episodes(false);
        assert_eq!(params.movie_id(), "tt0078748");
        assert_eq!(params.options.aka, Verbosity::Full);
        assert_eq!(params.options.release, Verbosity::Simple);
        assert!(!params.options.include_episodes);
    }
}
