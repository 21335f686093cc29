//! Article catalog, search and section partitioning.
//!
//! # Responsibility
//! - Ship the immutable builtin article table and browse categories.
//! - Provide id lookup, title search and featured/professional partitions.
//!
//! # Invariants
//! - The catalog is never mutated after construction.
//! - Search matches case-insensitive title substrings; a blank query
//!   matches everything.

/// One wellness article; `content` feeds the detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Article {
    /// Stable id stored by the favorites list.
    pub id: &'static str,
    pub title: &'static str,
    /// Cover image resolved by the asset collaborator.
    pub image_asset: &'static str,
    pub content: &'static str,
    /// Present only for professionally-attributed articles.
    pub category: Option<&'static str>,
}

const BUILTIN_ARTICLES: &[Article] = &[
    Article {
        id: "1",
        title: "7 hábitos diários que ajudam a reduzir a ansiedade",
        image_asset: "assets/articles/article1.png",
        content: "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod \
                  tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
                  quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo \
                  consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse \
                  cillum dolore eu fugiat nulla pariatur.",
        category: None,
    },
    Article {
        id: "2",
        title: "Alimentação e o bem-estar: o que podem ajudar ou prejudicar",
        image_asset: "assets/articles/article2.png",
        content: "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore \
                  eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, \
                  sunt in culpa qui officia deserunt mollit anim id est laborum. Lorem ipsum \
                  dolor sit amet, consectetur adipiscing elit.",
        category: None,
    },
    Article {
        id: "3",
        title: "Ansiedade ou estresse? Como diferenciar e lidar com cada um",
        image_asset: "assets/articles/article3.png",
        content: "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium \
                  doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore \
                  veritatis et quasi architecto beatae vitae dicta sunt explicabo.",
        category: Some("Artigos de profissionais"),
    },
    Article {
        id: "4",
        title: "Crise de ansiedade: o que fazer no momento em que ela acontece",
        image_asset: "assets/articles/article4.png",
        content: "Nemo enim ipsam voluptatem quia voluptas sit aspernatur aut odit aut fugit, \
                  sed quia consequuntur magni dolores eos qui ratione voluptatem sequi \
                  nesciunt.",
        category: None,
    },
    Article {
        id: "5",
        title: "Pensamentos acelerados: técnicas simples para desacelerar a mente",
        image_asset: "assets/articles/article5.png",
        content: "Neque porro quisquam est, qui dolorem ipsum quia dolor sit amet, \
                  consectetur, adipisci velit, sed quia non numquam eius modi tempora incidunt \
                  ut labore et dolore magnam aliquam quaerat voluptatem.",
        category: None,
    },
];

const BUILTIN_CATEGORIES: &[&str] = &["Ansiedade", "Depressão", "Autoestima", "Estresse"];

/// Immutable article table plus browse-screen category names.
#[derive(Debug, Clone)]
pub struct ArticleCatalog {
    articles: &'static [Article],
    categories: &'static [&'static str],
}

impl ArticleCatalog {
    /// Catalog shipped with the app.
    pub fn builtin() -> Self {
        Self {
            articles: BUILTIN_ARTICLES,
            categories: BUILTIN_CATEGORIES,
        }
    }

    /// All articles in catalog order.
    pub fn articles(&self) -> &[Article] {
        self.articles
    }

    /// Browse-screen category chip names.
    pub fn categories(&self) -> &[&'static str] {
        self.categories
    }

    pub fn by_id(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    /// Case-insensitive title substring search; a blank query returns the
    /// full catalog.
    pub fn search(&self, query: &str) -> Vec<&Article> {
        let needle = query.trim().to_lowercase();
        self.articles
            .iter()
            .filter(|article| article.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Articles without a category, shown in the featured section.
    pub fn featured(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| article.category.is_none())
            .collect()
    }

    /// Professionally-attributed articles (category present).
    pub fn professional(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| article.category.is_some())
            .collect()
    }
}

impl Default for ArticleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
