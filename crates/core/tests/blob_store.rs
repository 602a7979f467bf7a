//! Blob read/write behavior against the in-memory and local backends.

use std::io::{Cursor, Read};
use std::sync::Arc;
use tempfile::TempDir;
use vk_core::storage::{
    read, read_from_bucket, write, BlobContent, BlobUri, InMemoryBackend, ObjectStoreBackend,
    StorageConfig, StorageError,
};

/// Both backends under test. The TempDir must outlive the local config.
fn backends() -> (TempDir, Vec<StorageConfig>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let local = StorageConfig::new(Arc::new(ObjectStoreBackend::Local {
        root: dir.path().to_path_buf(),
    }))
    .with_project("fraud-project");
    let memory = StorageConfig::in_memory().with_project("fraud-project");
    (dir, vec![memory, local])
}

#[tokio::test]
async fn test_write_then_raw_read_is_byte_identical() {
    let (_dir, configs) = backends();
    let payload: Vec<u8> = (0u8..=255).chain(b"\r\n\0 trailing".iter().copied()).collect();

    for storage in configs {
        write(&storage, "artifacts", "models/model.bst", &mut Cursor::new(payload.clone()))
            .await
            .expect("Upload should succeed");

        let content = read_from_bucket(&storage, "artifacts", "models/model.bst", false)
            .await
            .expect("Download should succeed");

        assert_eq!(content.as_bytes(), Some(payload.as_slice()), "{storage:?}");
    }
}

#[tokio::test]
async fn test_yaml_deserialization() {
    let (_dir, configs) = backends();

    for storage in configs {
        write(&storage, "b", "doc.yaml", &mut Cursor::new(b"a: 1\nb: [2,3]".to_vec()))
            .await
            .expect("Upload should succeed");

        let content = read_from_bucket(&storage, "b", "doc.yaml", true)
            .await
            .expect("Download should succeed");

        let BlobContent::Yaml(value) = content else {
            panic!("Expected parsed YAML");
        };
        let mapping = value.as_mapping().expect("Document should be a mapping");
        assert_eq!(mapping.len(), 2);
        assert_eq!(value.get("a").and_then(|v| v.as_i64()), Some(1));
        let b: Vec<i64> = value
            .get("b")
            .and_then(|v| v.as_sequence())
            .expect("b should be a sequence")
            .iter()
            .filter_map(|v| v.as_i64())
            .collect();
        assert_eq!(b, vec![2, 3]);
    }
}

#[tokio::test]
async fn test_missing_object_is_not_found() {
    let (_dir, configs) = backends();

    for storage in configs {
        let raw = read_from_bucket(&storage, "artifacts", "absent.yaml", false).await;
        assert!(
            matches!(raw, Err(StorageError::NotFound { ref bucket, ref path })
                if bucket == "artifacts" && path == "absent.yaml"),
            "Expected NotFound, got {raw:?}"
        );

        let parsed = read_from_bucket(&storage, "artifacts", "absent.yaml", true).await;
        assert!(matches!(parsed, Err(StorageError::NotFound { .. })));
    }
}

#[tokio::test]
async fn test_partially_read_buffer_is_uploaded_in_full() {
    let (_dir, configs) = backends();

    for storage in configs {
        let mut buffer = Cursor::new(b"first line\nsecond line\n".to_vec());
        let mut consumed = [0u8; 11];
        buffer.read_exact(&mut consumed).expect("Read should succeed");
        assert_eq!(&consumed, b"first line\n");

        write(&storage, "b", "lines.txt", &mut buffer)
            .await
            .expect("Upload should succeed");

        let content = read_from_bucket(&storage, "b", "lines.txt", false)
            .await
            .expect("Download should succeed");
        assert_eq!(content.as_bytes(), Some(&b"first line\nsecond line\n"[..]));
    }
}

#[tokio::test]
async fn test_write_replaces_existing_object() {
    let (_dir, configs) = backends();

    for storage in configs {
        write(&storage, "b", "k.txt", &mut Cursor::new(b"a much longer original".to_vec()))
            .await
            .expect("First upload should succeed");
        write(&storage, "b", "k.txt", &mut Cursor::new(b"short".to_vec()))
            .await
            .expect("Second upload should succeed");

        let content = read_from_bucket(&storage, "b", "k.txt", false)
            .await
            .expect("Download should succeed");
        assert_eq!(content.as_bytes(), Some(&b"short"[..]));
    }
}

#[tokio::test]
async fn test_read_handle_is_lazy() {
    let (_dir, configs) = backends();

    for storage in configs {
        let handle = read(&storage, "b", "later.json");

        assert_eq!(handle.project_id(), Some("fraud-project"));
        assert_eq!(handle.uri(), BlobUri::new("b", "later.json"));
        assert!(!handle.exists().await.expect("Existence check should succeed"));
        assert!(handle.download_as_bytes().await.unwrap_err().is_not_found());

        write(&storage, "b", "later.json", &mut Cursor::new(b"{}".to_vec()))
            .await
            .expect("Upload should succeed");
        assert!(handle.exists().await.expect("Existence check should succeed"));
    }
}

#[tokio::test]
async fn test_every_read_refetches() {
    let storage = StorageConfig::in_memory();

    write(&storage, "b", "threshold.yaml", &mut Cursor::new(b"value: 0.5".to_vec()))
        .await
        .expect("Upload should succeed");
    let first = read_from_bucket(&storage, "b", "threshold.yaml", true)
        .await
        .expect("Download should succeed");

    write(&storage, "b", "threshold.yaml", &mut Cursor::new(b"value: 0.9".to_vec()))
        .await
        .expect("Upload should succeed");
    let second = read_from_bucket(&storage, "b", "threshold.yaml", true)
        .await
        .expect("Download should succeed");

    assert_ne!(first, second);
    assert_eq!(
        second.as_yaml().and_then(|v| v.get("value")).and_then(|v| v.as_f64()),
        Some(0.9)
    );
}

#[tokio::test]
async fn test_rejected_upload_is_surfaced_unchanged() {
    let backend = Arc::new(InMemoryBackend::rejecting("403 Forbidden: storage.objects.create"));
    let storage = StorageConfig::new(backend.clone()).with_project("fraud-project");

    let err = write(&storage, "b", "k", &mut Cursor::new(b"v".to_vec()))
        .await
        .expect_err("Upload should be rejected");

    match &err {
        StorageError::Request { bucket, path, source } => {
            assert_eq!(bucket, "b");
            assert_eq!(path, "k");
            assert_eq!(source.to_string(), "403 Forbidden: storage.objects.create");
        }
        other => panic!("Expected Request error, got {other:?}"),
    }
    assert!(backend.is_empty().await, "Nothing should be stored");
}

#[tokio::test]
async fn test_uri_round_trip_through_storage() {
    let storage = StorageConfig::in_memory();
    let uri: BlobUri = "gs://fraud-project-bucket/metrics/eval.yaml"
        .parse()
        .expect("URI should parse");

    write(&storage, &uri.bucket, &uri.path, &mut Cursor::new(b"avg_pr: 0.83".to_vec()))
        .await
        .expect("Upload should succeed");

    let handle = read(&storage, &uri.bucket, &uri.path);
    assert_eq!(handle.uri(), uri);
    assert!(handle.exists().await.expect("Existence check should succeed"));
}
