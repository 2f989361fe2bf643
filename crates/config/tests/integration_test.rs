//! End-to-end tests of the public ingestion API: an uploaded file is parsed
//! and merged into the variables a project already has.

use deploydash_config::envfile::{
    Entry, OrderedEntries, ParseMode, merge_entries, merge_into, parse_env_text,
    parse_env_text_report, parse_with_mode,
};

const UPLOADED: &str = r#"# database
DATABASE_URL=postgres://app:pw@db:5432/app
REDIS_HOST: cache.internal

! spring style comment
server.port=8080
PRIVATE_KEY="-----BEGIN KEY-----
abc123
-----END KEY-----"
API_KEY='quoted'
garbage line
DATABASE_URL=postgres://app:pw@db-replica:5432/app
"#;

#[test]
fn test_parse_realistic_file() {
    let report = parse_env_text_report(UPLOADED);
    let keys: Vec<&str> = report.entries.iter().map(|e| e.key.as_str()).collect();

    assert_eq!(
        keys,
        vec![
            "DATABASE_URL",
            "REDIS_HOST",
            "server.port",
            "PRIVATE_KEY",
            "API_KEY",
            "DATABASE_URL",
        ]
    );
    assert_eq!(
        report.entries.as_slice()[3].value,
        "-----BEGIN KEY-----\nabc123\n-----END KEY-----"
    );
    assert_eq!(report.skipped_lines, vec![11]);
    assert!(report.unterminated.is_none());
}

#[test]
fn test_import_into_existing_project_variables() {
    let existing = OrderedEntries::from(vec![
        Entry::new("NODE_ENV", "production"),
        Entry::new("DATABASE_URL", "postgres://old"),
    ]);

    let merged = merge_entries(&existing, &parse_env_text(UPLOADED));

    let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "NODE_ENV",
            "DATABASE_URL",
            "REDIS_HOST",
            "server.port",
            "PRIVATE_KEY",
            "API_KEY",
        ]
    );
    // the later replica line wins over both the base and the first occurrence
    assert_eq!(merged["DATABASE_URL"], "postgres://app:pw@db-replica:5432/app");
    assert_eq!(merged["API_KEY"], "quoted");
}

#[test]
fn test_second_import_supersedes_first() {
    let mut current = OrderedEntries::new().materialize();
    merge_into(&mut current, &parse_env_text("A=1\nB=2"));
    let stats = merge_into(&mut current, &parse_env_text("B=3\nC=4"));

    assert_eq!(stats.added, vec!["C".to_string()]);
    assert_eq!(stats.updated, vec!["B".to_string()]);
    assert_eq!(current["B"], "3");
}

#[test]
fn test_strict_mode_rejects_truncated_upload() {
    let truncated = "A=1\nCERT=\"-----BEGIN-----\nabc";
    assert!(parse_with_mode(truncated, ParseMode::Strict).is_err());

    let lenient = parse_with_mode(truncated, ParseMode::Lenient).unwrap();
    assert_eq!(lenient.entries.len(), 1);
}
