use alento_core::db::open_db_in_memory;
use alento_core::{
    ArticleCatalog, BlobStore, FavoritesRepository, FavoritesService, KvFavoritesRepository,
    KvProfileRepository, ProfileService, SqliteBlobStore, UserProfile,
};

#[test]
fn toggle_round_trips_through_store() {
    let conn = open_db_in_memory().unwrap();
    let service = FavoritesService::new(KvFavoritesRepository::new(SqliteBlobStore::new(&conn)));

    assert!(service.favorite_ids().is_empty());

    assert!(service.toggle("2").unwrap());
    assert!(service.is_favorite("2"));
    assert_eq!(service.favorite_ids(), vec!["2".to_string()]);

    assert!(!service.toggle("2").unwrap());
    assert!(!service.is_favorite("2"));
    assert!(service.favorite_ids().is_empty());
}

#[test]
fn favorites_store_uses_plain_id_array_payload() {
    let conn = open_db_in_memory().unwrap();
    let blobs = SqliteBlobStore::new(&conn);
    let service = FavoritesService::new(KvFavoritesRepository::new(SqliteBlobStore::new(&conn)));

    service.toggle("1").unwrap();
    assert_eq!(
        blobs.read_blob("favorites").unwrap().as_deref(),
        Some(r#"["1"]"#)
    );

    service.toggle("1").unwrap();
    assert_eq!(blobs.read_blob("favorites").unwrap().as_deref(), Some("[]"));
}

#[test]
fn corrupt_favorites_blob_recovers_to_empty() {
    let conn = open_db_in_memory().unwrap();
    let blobs = SqliteBlobStore::new(&conn);
    blobs.write_blob("favorites", "prefix{").unwrap();

    let repo = KvFavoritesRepository::new(SqliteBlobStore::new(&conn));
    assert!(repo.load().is_empty());
}

#[test]
fn favorite_articles_resolve_in_catalog_order_skipping_unknown() {
    let conn = open_db_in_memory().unwrap();
    let service = FavoritesService::new(KvFavoritesRepository::new(SqliteBlobStore::new(&conn)));
    let catalog = ArticleCatalog::builtin();

    service.toggle("4").unwrap();
    service.toggle("999").unwrap();
    service.toggle("1").unwrap();

    let resolved = service.favorite_articles(&catalog);
    let ids: Vec<&str> = resolved.iter().map(|article| article.id).collect();
    assert_eq!(ids, vec!["1", "4"]);
}

#[test]
fn search_is_case_insensitive_and_blank_returns_all() {
    let catalog = ArticleCatalog::builtin();

    assert_eq!(catalog.search("").len(), 5);
    assert_eq!(catalog.search("   ").len(), 5);

    let hits = catalog.search("CRISE");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "4");

    assert!(catalog.search("nada disso aqui").is_empty());
}

#[test]
fn featured_and_professional_partition_by_category() {
    let catalog = ArticleCatalog::builtin();

    let featured: Vec<&str> = catalog.featured().iter().map(|article| article.id).collect();
    assert_eq!(featured, vec!["1", "2", "4", "5"]);

    let professional: Vec<&str> = catalog
        .professional()
        .iter()
        .map(|article| article.id)
        .collect();
    assert_eq!(professional, vec!["3"]);

    assert_eq!(
        catalog.by_id("3").unwrap().category,
        Some("Artigos de profissionais")
    );
    assert!(catalog.by_id("9").is_none());
    assert_eq!(
        catalog.categories(),
        ["Ansiedade", "Depressão", "Autoestima", "Estresse"].as_slice()
    );
}

#[test]
fn profile_round_trips_with_camel_case_payload() {
    let conn = open_db_in_memory().unwrap();
    let blobs = SqliteBlobStore::new(&conn);
    let service = ProfileService::new(KvProfileRepository::new(SqliteBlobStore::new(&conn)));

    let profile = UserProfile {
        name: "Marina".to_string(),
        avatar_uri: Some("file:///m.png".to_string()),
    };
    service.save(&profile).unwrap();
    assert_eq!(service.get(), profile);

    let payload = blobs.read_blob("userProfile").unwrap().unwrap();
    assert!(payload.contains(r#""avatarUri":"file:///m.png""#));
}

#[test]
fn missing_or_blank_profile_falls_back_for_display() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(KvProfileRepository::new(SqliteBlobStore::new(&conn)));

    let stored = service.get();
    assert_eq!(stored, UserProfile::default());
    assert_eq!(stored.display_name(), "Usuário");

    service
        .save(&UserProfile {
            name: "   ".to_string(),
            avatar_uri: None,
        })
        .unwrap();
    assert_eq!(service.get().display_name(), "Usuário");
}
