use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wordscan::engine::{
    Cli, format_results, glob_match, is_os_hidden_file, resolve_options, should_scan,
};
use wordscan::utils::parse_wordscan_toml;
use wordscan::{Settings, SimilarityResult};

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["wordscan"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

// --- settings resolution ---

#[test]
fn test_defaults_without_file_or_flags() {
    let opts = resolve_options(&cli(&[]), None);
    assert_eq!(opts.settings.root, PathBuf::from("files"));
    assert_eq!(opts.settings.worker_count(), 2);
    assert_eq!(opts.settings.queue_capacity(), 2);
    assert_eq!(opts.settings.rescan_delay, Duration::from_secs(60));
    assert_eq!(opts.settings.top_k, 10);
    assert_eq!(opts.settings.include, "*.txt");
    assert!(!opts.settings.single_pass);
    assert!(!opts.similarity);
    assert!(opts.reference.is_none());
}

#[test]
fn test_flags_override_defaults() {
    let opts = resolve_options(
        &cli(&[
            "corpus", "-w", "4", "--queue-capacity", "8", "--rescan-delay", "5", "-k", "0",
            "--once", "-e", "tmp*", "*.bak",
        ]),
        None,
    );
    assert_eq!(opts.settings.root, PathBuf::from("corpus"));
    assert_eq!(opts.settings.worker_count(), 4);
    assert_eq!(opts.settings.queue_capacity(), 8);
    assert_eq!(opts.settings.rescan_delay, Duration::from_secs(5));
    assert_eq!(opts.settings.top_k, 0);
    assert!(opts.settings.single_pass);
    assert_eq!(opts.settings.exclude, vec!["tmp*", "*.bak"]);
}

#[test]
fn test_reference_flag_implies_similarity() {
    let opts = resolve_options(&cli(&["-r", "files/ref.txt"]), None);
    assert_eq!(opts.reference, Some(PathBuf::from("files/ref.txt")));
    assert!(opts.similarity);

    let opts = resolve_options(&cli(&["-r", "files/ref.txt", "--similarity", "false"]), None);
    assert!(!opts.similarity);
}

#[test]
fn test_file_settings_then_cli_override() {
    let file = parse_wordscan_toml(
        r#"
        [settings]
        root = "texts"
        workers = 3
        rescan_delay = 10
        top_k = 5
        exclude = ["draft*"]
        once = true
        reference = "texts/ref.txt"
        similarity = true
        "#,
    )
    .unwrap();

    let opts = resolve_options(&cli(&[]), Some(&file));
    assert_eq!(opts.settings.root, PathBuf::from("texts"));
    assert_eq!(opts.settings.worker_count(), 3);
    assert_eq!(opts.settings.rescan_delay, Duration::from_secs(10));
    assert_eq!(opts.settings.top_k, 5);
    assert_eq!(opts.settings.exclude, vec!["draft*"]);
    assert!(opts.settings.single_pass);
    assert_eq!(opts.reference, Some(PathBuf::from("texts/ref.txt")));
    assert!(opts.similarity);

    let opts = resolve_options(&cli(&["other", "-w", "1", "--once", "false"]), Some(&file));
    assert_eq!(opts.settings.root, PathBuf::from("other"));
    assert_eq!(opts.settings.worker_count(), 1);
    assert!(!opts.settings.single_pass);
    assert_eq!(opts.settings.top_k, 5);
}

#[test]
fn test_empty_toml_keeps_defaults() {
    let file = parse_wordscan_toml("").unwrap();
    let opts = resolve_options(&cli(&[]), Some(&file));
    assert_eq!(opts.settings.root, Settings::default().root);
}

#[test]
fn test_invalid_toml_is_error() {
    assert!(parse_wordscan_toml("[settings]\nworkers = \"many\"").is_err());
}

#[test]
fn test_zero_workers_clamped() {
    let settings = Settings {
        workers: 0,
        ..Default::default()
    };
    assert_eq!(settings.worker_count(), 1);
    assert_eq!(settings.queue_capacity(), 1);
}

// --- result output ---

#[test]
fn test_format_results_empty() {
    let out = format_results(&[]);
    assert!(out.starts_with("Similarity results: 0"));
    assert!(out.contains("No similarity results to display."));
}

#[test]
fn test_format_results_lists_in_given_order() {
    let out = format_results(&[
        SimilarityResult::new("b.txt", 0.8),
        SimilarityResult::new("c.txt", 0.25),
    ]);
    let b = out.find("b.txt - similarity: 0.8000").unwrap();
    let c = out.find("c.txt - similarity: 0.2500").unwrap();
    assert!(b < c);
    assert!(out.contains("SORTED SIMILARITY RESULTS"));
}

// --- walk filters ---

#[test]
fn test_glob_match_literal_and_star() {
    assert!(glob_match("*.txt", "notes.txt"));
    assert!(glob_match("*.txt", ".txt"));
    assert!(!glob_match("*.txt", "notes.txt.bak"));
    assert!(glob_match("draft-?.txt", "draft-1.txt"));
    assert!(!glob_match("draft-?.txt", "draft-12.txt"));
    assert!(glob_match("!tmp*", "tmp-file"));
}

#[test]
fn test_glob_match_many_stars_on_long_name() {
    let name = "a".repeat(200);
    let start = std::time::Instant::now();
    assert!(!glob_match("*a*a*a*a*a*a*a*a*a*a*b", &name));
    assert!(glob_match("*a*a*a*a*a*a*a*a*a*a*", &name));
    assert!(start.elapsed() < Duration::from_secs(1));

    assert!(glob_match("a*b*c", "aXXbYYc"));
    assert!(!glob_match("a*b*c", "aXXbYY"));
    assert!(!glob_match("*?", ""));
    assert!(glob_match("**", ""));
}

#[test]
fn test_os_hidden_files() {
    assert!(is_os_hidden_file(&PathBuf::from("/x/.DS_Store")));
    assert!(is_os_hidden_file(&PathBuf::from("/x/._notes.txt")));
    assert!(!is_os_hidden_file(&PathBuf::from("/x/notes.txt")));
}

#[test]
fn test_should_scan_include_and_exclude() {
    let exclude = vec!["secret*".to_string()];
    assert!(should_scan(&PathBuf::from("/x/a.txt"), "*.txt", &exclude));
    assert!(!should_scan(&PathBuf::from("/x/a.md"), "*.txt", &exclude));
    assert!(!should_scan(&PathBuf::from("/x/secret.txt"), "*.txt", &exclude));
    assert!(!should_scan(&PathBuf::from("/x/._a.txt"), "*.txt", &[]));
}
