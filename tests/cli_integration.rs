use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const CREDENTIAL_VARS: [&str; 4] = [
    "ETSY_API_KEY",
    "ETSY_ACCESS_TOKEN",
    "ETSY_SHOP_ID",
    "PRINTFUL_API_KEY",
];

/// A command isolated from the caller's environment and `.env` file.
fn publisher(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("product-publisher").unwrap();
    cmd.current_dir(workdir)
        .env("WEBSITE_OUTPUT_DIR", workdir.join("out"))
        .env_remove("RUST_LOG");
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn product_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json") && name != "products.json")
        .collect()
}

#[test]
fn test_add_product_to_website() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args([
            "add-product", "-t", "Mug", "-d", "Nice", "-p", "10", "-q", "2", "-c", "website",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Listing ID: mug-"));

    let out = temp.path().join("out");
    let files = product_files(&out);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("mug-"));

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(&files[0])).unwrap()).unwrap();
    assert_eq!(stored["title"], "Mug");
    assert_eq!(stored["description"], "Nice");
    assert!(stored["created_at"].is_string());

    let catalogue: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("products.json")).unwrap())
            .unwrap();
    let entries = catalogue.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Mug");
    assert_eq!(entries[0]["price"].as_f64(), Some(10.0));
    assert_eq!(entries[0]["quantity"], 2);
    assert_eq!(
        format!("{}.json", entries[0]["id"].as_str().unwrap()),
        files[0]
    );
}

#[test]
fn test_add_product_with_images_on_website() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args([
            "add-product",
            "-t",
            "Poster",
            "-d",
            "A3 print",
            "-p",
            "25.5",
            "-q",
            "0",
            "--images",
            "https://img.example/1.jpg,https://img.example/2.jpg",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 images"));

    let out = temp.path().join("out");
    let files = product_files(&out);
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(&files[0])).unwrap()).unwrap();
    assert_eq!(stored["images"][1]["rank"], 2);
    assert_eq!(stored["images"][1]["url"], "https://img.example/2.jpg");
}

#[test]
fn test_invalid_product_is_rejected() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args([
            "add-product", "-t", "", "-d", "Nice", "-p", "-5", "-q", "2", "-c", "website",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Title is required"))
        .stderr(predicate::str::contains("Price must be greater than 0"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_infinite_price_is_rejected() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args([
            "add-product", "-t", "Mug", "-d", "Nice", "-p", "inf", "-q", "2", "-c", "website",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Price must be a finite number"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_unknown_channel() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args([
            "add-product", "-t", "Mug", "-d", "Nice", "-p", "10", "-q", "2", "-c", "shopify",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown channel 'shopify'"));
}

#[test]
fn test_etsy_without_credentials_names_missing_variables() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .env("ETSY_API_KEY", "key")
        .args([
            "add-product", "-t", "Mug", "-d", "Nice", "-p", "10", "-q", "2", "-c", "etsy",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ETSY_ACCESS_TOKEN, ETSY_SHOP_ID"))
        .stderr(predicate::str::contains("ETSY_API_KEY,").not());
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args([
            "add-product",
            "-t",
            "Mug",
            "-d",
            "Nice",
            "-p",
            "10",
            "-q",
            "2",
            "-c",
            "etsy",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("missing environment variables"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_validate_product() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args([
            "validate-product",
            "-t",
            "  Mug  ",
            "-d",
            "Nice",
            "-p",
            "0.01",
            "-q",
            "0",
            "--tags",
            "a,b,c",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product is valid"))
        .stdout(predicate::str::contains("Tags:        a, b, c"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_validate_product_reports_long_tag() {
    let temp = tempfile::tempdir().unwrap();
    let tags = format!("ok,{}", "x".repeat(21));

    publisher(temp.path())
        .args([
            "validate-product", "-t", "Mug", "-d", "Nice", "-p", "1", "-q", "1", "--tags", &tags,
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Tag 2 must be 20 characters or less"));
}

#[test]
fn test_update_product_on_website() {
    let temp = tempfile::tempdir().unwrap();

    let output = publisher(temp.path())
        .args(["add-product", "-t", "Mug", "-d", "Nice", "-p", "10", "-q", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out = temp.path().join("out");
    let id = product_files(&out)[0].trim_end_matches(".json").to_string();

    publisher(temp.path())
        .args(["update-product", &id, "-q", "7"])
        .assert()
        .success();

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(format!("{id}.json"))).unwrap())
            .unwrap();
    assert_eq!(stored["quantity"], 7);
    assert_eq!(stored["title"], "Mug");

    publisher(temp.path())
        .args(["update-product", "missing-1", "-q", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Product missing-1 not found"));
}

#[test]
fn test_update_product_needs_a_field() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args(["update-product", "mug-1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_provider_products_requires_key() {
    let temp = tempfile::tempdir().unwrap();

    publisher(temp.path())
        .args(["provider-products"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("PRINTFUL_API_KEY"));
}
