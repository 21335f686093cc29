//! Favorites toggling and lookup against the article catalog.

use log::info;

use crate::model::article::{Article, ArticleCatalog};
use crate::repo::favorites_repo::FavoritesRepository;
use crate::repo::StoreResult;

/// Stateless service over the favorites store.
pub struct FavoritesService<R: FavoritesRepository> {
    repo: R,
}

impl<R: FavoritesRepository> FavoritesService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Current favorite ids in insertion order.
    pub fn favorite_ids(&self) -> Vec<String> {
        self.repo.load()
    }

    pub fn is_favorite(&self, article_id: &str) -> bool {
        self.repo.load().iter().any(|id| id == article_id)
    }

    /// Adds or removes `article_id` and persists the updated list.
    ///
    /// Returns whether the article is a favorite after the toggle. The
    /// write happens before the result is reported, so a failed write
    /// leaves the stored list unchanged.
    pub fn toggle(&self, article_id: &str) -> StoreResult<bool> {
        let mut ids = self.repo.load();
        let adding = !ids.iter().any(|id| id == article_id);
        if adding {
            ids.push(article_id.to_string());
        } else {
            ids.retain(|id| id != article_id);
        }
        self.repo.persist(&ids)?;
        info!(
            "event=favorites_toggle module=service status=ok article={article_id} favorite={adding}"
        );
        Ok(adding)
    }

    /// Resolves the stored ids against `catalog`, in catalog order.
    ///
    /// Ids that no longer resolve are skipped, not surfaced.
    pub fn favorite_articles<'c>(&self, catalog: &'c ArticleCatalog) -> Vec<&'c Article> {
        let ids = self.repo.load();
        catalog
            .articles()
            .iter()
            .filter(|article| ids.iter().any(|id| id == article.id))
            .collect()
    }
}
