use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "stickframe_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn memory_store_roundtrips_values() {
    let mut store = MemoryStore::new().with_entry("a", "1");
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(store.get("b").unwrap(), None);
    store.set("a", "2").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
}

#[test]
fn file_store_writes_one_file_per_key() {
    let root = temp_dir("file_store");
    let mut store = FileStore::new(&root);
    assert_eq!(store.get("stickman-animations").unwrap(), None);

    store.set("stickman-animations", "[]").unwrap();
    store.set("stickman-animations", "[1]").unwrap();
    assert_eq!(
        store.get("stickman-animations").unwrap().as_deref(),
        Some("[1]")
    );
    assert!(root.join("stickman-animations.json").is_file());
    assert!(!root.join("stickman-animations.json.tmp").exists());

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn file_store_rejects_path_like_keys() {
    let mut store = FileStore::new(temp_dir("file_store_keys"));
    assert!(matches!(
        store.set("../escape", "x"),
        Err(StickframeError::Storage(_))
    ));
    assert!(store.get("").is_err());
}
