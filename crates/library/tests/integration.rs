//! Integration tests for the SQLite library

use bitcheck_errors::{Error, LibraryError};
use bitcheck_events::{AppEvent, LibraryEvent};
use bitcheck_hash::Hash;
use bitcheck_library::{import, ItemStore, MemoryLibrary, Selector, SqliteLibrary};
use bitcheck_types::{Item, MediaType};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

async fn open_library(dir: &TempDir) -> SqliteLibrary {
    SqliteLibrary::open(&dir.path().join("db").join("library.db"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_and_list_ordered_by_path() {
    let dir = TempDir::new().unwrap();
    let library = open_library(&dir).await;

    let b = library.register(Path::new("/music/b.flac")).await.unwrap();
    let a = library.register(Path::new("/music/a.mp3")).await.unwrap();
    assert!(a.is_some() && b.is_some());

    let duplicate = library.register(Path::new("/music/a.mp3")).await.unwrap();
    assert!(duplicate.is_none());

    let items = library.items(&Selector::all()).await.unwrap();
    let paths: Vec<_> = items.iter().map(|i| i.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            std::path::PathBuf::from("/music/a.mp3"),
            std::path::PathBuf::from("/music/b.flac")
        ]
    );
    assert_eq!(items[0].media_type, MediaType::Mp3);
    assert!(items.iter().all(|i| i.checksum.is_none()));
}

#[tokio::test]
async fn test_selector_filters_in_store() {
    let dir = TempDir::new().unwrap();
    let library = open_library(&dir).await;
    for path in ["/m/Live/1.flac", "/m/Live/2.mp3", "/m/Studio/3.flac"] {
        library.register(Path::new(path)).await.unwrap();
    }

    let flac = library
        .items(&Selector::parse(&["type:flac"]).unwrap())
        .await
        .unwrap();
    assert_eq!(flac.len(), 2);

    let live_flac = library
        .items(&Selector::parse(&["type:flac", "Live"]).unwrap())
        .await
        .unwrap();
    assert_eq!(live_flac.len(), 1);
    assert_eq!(live_flac[0].path, Path::new("/m/Live/1.flac"));
}

#[tokio::test]
async fn test_save_checksum_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let digest = Hash::from_data(b"audio");
    {
        let library = open_library(&dir).await;
        let item = library
            .register(Path::new("/m/x.ogg"))
            .await
            .unwrap()
            .unwrap();
        library.save_checksum(&item, &digest).await.unwrap();
    }

    let library = open_library(&dir).await;
    let items = library.items(&Selector::all()).await.unwrap();
    assert_eq!(items[0].checksum.as_deref(), Some(digest.to_hex().as_str()));
}

#[tokio::test]
async fn test_save_checksum_unknown_item() {
    let dir = TempDir::new().unwrap();
    let library = open_library(&dir).await;
    let ghost = Item::new(4242, "/m/ghost.mp3");

    let err = library
        .save_checksum(&ghost, &Hash::from_data(b""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Library(LibraryError::ItemNotFound { id: 4242 })
    ));
}

#[tokio::test]
async fn test_import_into_sqlite_emits_events() {
    let dir = TempDir::new().unwrap();
    let media = dir.path().join("media");
    std::fs::create_dir(&media).unwrap();
    std::fs::write(media.join("song.mp3"), b"id3").unwrap();

    let library = open_library(&dir).await;
    let (tx, mut rx) = bitcheck_events::channel();
    let summary = import(&library, &[media.clone()], &tx).await.unwrap();
    drop(tx);
    assert_eq!(summary.added, 1);

    let mut imported = 0;
    let mut completed = false;
    while let Some(message) = rx.recv().await {
        match message.event {
            AppEvent::Library(LibraryEvent::ItemImported { .. }) => imported += 1,
            AppEvent::Library(LibraryEvent::ImportCompleted { added, .. }) => {
                completed = true;
                assert_eq!(added, 1);
            }
            _ => {}
        }
    }
    assert_eq!(imported, 1);
    assert!(completed);

    let items = library.items(&Selector::all()).await.unwrap();
    assert!(items[0].path.is_absolute());
}

#[tokio::test]
async fn test_memory_and_sqlite_stores_agree_on_order() {
    let dir = TempDir::new().unwrap();
    let sqlite = open_library(&dir).await;
    let memory = MemoryLibrary::new();
    for path in ["/m/a/b.mp3", "/m/a-b.mp3", "/m/a.mp3"] {
        sqlite.register(Path::new(path)).await.unwrap();
        memory.register(Path::new(path)).await.unwrap();
    }

    let paths = |items: Vec<Item>| -> Vec<PathBuf> { items.into_iter().map(|i| i.path).collect() };
    let from_sqlite = paths(sqlite.items(&Selector::all()).await.unwrap());
    let from_memory = paths(memory.items(&Selector::all()).await.unwrap());

    assert_eq!(
        from_sqlite,
        vec![
            PathBuf::from("/m/a-b.mp3"),
            PathBuf::from("/m/a.mp3"),
            PathBuf::from("/m/a/b.mp3"),
        ]
    );
    assert_eq!(from_memory, from_sqlite);
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_path_is_refused() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let library = open_library(&dir).await;
    let path = Path::new("/music").join(OsStr::from_bytes(b"caf\xe9.mp3"));

    let err = library.register(&path).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Library(LibraryError::UnsupportedPath { .. })
    ));
    assert!(library.items(&Selector::all()).await.unwrap().is_empty());
}
