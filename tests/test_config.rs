use staticd::config::Config;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

static SEQ: AtomicU32 = AtomicU32::new(0);

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "staticd-{}-{}-{}",
        name,
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_parse_config_yaml() {
    let cfg = Config::parse(
        r#"
listen_addr: "127.0.0.1:8080"
virtual_hosts:
  "example.com": "/srv/example"
  "other.example": "/srv/other"
"#,
    )
    .unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.virtual_hosts.len(), 2);
    assert_eq!(cfg.virtual_hosts.get("example.com").unwrap(), "/srv/example");
}

#[test]
fn test_parse_rejects_missing_fields() {
    assert!(Config::parse("listen_addr: \"127.0.0.1:8080\"").is_err());
}

#[test]
fn test_validate_accepts_existing_directories() {
    let root_a = scratch_dir("config-root-a");
    let root_b = scratch_dir("config-root-b");

    let cfg = Config::parse(&format!(
        "listen_addr: \"127.0.0.1:0\"\nvirtual_hosts:\n  \"a.example\": \"{}\"\n  \"b.example\": \"{}\"\n",
        root_a.display(),
        root_b.display()
    ))
    .unwrap();

    assert!(cfg.validate().is_ok());
}

#[test]
fn test_validate_rejects_missing_root() {
    let cfg = Config::parse(
        "listen_addr: \"127.0.0.1:0\"\nvirtual_hosts:\n  \"a.example\": \"/no/such/dir/anywhere\"\n",
    )
    .unwrap();

    assert!(cfg.validate().is_err());
}

#[test]
fn test_validate_rejects_file_as_root() {
    let dir = scratch_dir("config-file-root");
    let file = dir.join("not-a-dir.txt");
    std::fs::write(&file, b"x").unwrap();

    let cfg = Config::parse(&format!(
        "listen_addr: \"127.0.0.1:0\"\nvirtual_hosts:\n  \"a.example\": \"{}\"\n",
        file.display()
    ))
    .unwrap();

    assert!(cfg.validate().is_err());
}
