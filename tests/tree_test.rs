//! End-to-end tests over a source tree on disk

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use reindent::process::{process_file, FileOutcome, OutputMode, DEFAULT_MAX_FILE_SIZE};
use reindent::{Config, FileSelector};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_reindent_tree_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("src/server.cpp"), "void Server::step()\n{\n\tstep();  \n}\n\n\n");
    write(&root.join("src/server.h"), "class Server\n{\n    int m_port;\n};\n");
    write(&root.join("src/bad.h"), "int a;\n  int b;\n");
    write(&root.join("src/script.py"), "def f():\n\treturn 1\n");
    write(&root.join("src/util/serialize.h"), "\tint v;\n");

    let config = Config::default();
    let selector = FileSelector::new(&config.extensions, &[], false);
    let files = selector.collect(&[root.join("src")]);
    assert_eq!(
        files,
        vec![
            root.join("src/bad.h"),
            root.join("src/server.cpp"),
            root.join("src/server.h"),
        ]
    );

    let mut reports = Vec::new();
    for path in &files {
        let outcome = process_file(
            path,
            &config.indent_params().unwrap(),
            OutputMode::InPlace,
            DEFAULT_MAX_FILE_SIZE,
        )
        .unwrap();
        if let FileOutcome::Processed(file) = outcome {
            reports.push((path.clone(), file.changed, file.diagnostics.len()));
        }
    }

    assert_eq!(
        reports,
        vec![
            (root.join("src/bad.h"), false, 1),
            (root.join("src/server.cpp"), true, 0),
            (root.join("src/server.h"), true, 0),
        ]
    );
    assert_eq!(
        fs::read_to_string(root.join("src/server.cpp")).unwrap(),
        "void Server::step()\n{\n  step();\n}\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/server.h")).unwrap(),
        "class Server\n{\n  int m_port;\n};\n"
    );
    // Unselected files are untouched
    assert_eq!(
        fs::read_to_string(root.join("src/script.py")).unwrap(),
        "def f():\n\treturn 1\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/util/serialize.h")).unwrap(),
        "\tint v;\n"
    );
    // No temporary files left in the tree
    let leftovers: Vec<_> = fs::read_dir(root.join("src"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_second_run_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.cpp");
    write(&path, "int f()\n{\n\treturn 0;\n}\n");

    let params = Config::default().indent_params().unwrap();
    let first = process_file(&path, &params, OutputMode::InPlace, DEFAULT_MAX_FILE_SIZE).unwrap();
    let FileOutcome::Processed(first) = first else {
        panic!("file was skipped");
    };
    assert!(first.written);

    // The rewritten file is in the output unit now; a check run finds
    // misaligned 2-space indentation rather than silently halving it again
    let second = process_file(&path, &params, OutputMode::Check, DEFAULT_MAX_FILE_SIZE).unwrap();
    let FileOutcome::Processed(second) = second else {
        panic!("file was skipped");
    };
    assert!(!second.changed);
    assert_eq!(second.diagnostics.len(), 1);
    assert_eq!(second.diagnostics[0].line_number, 3);
}

#[test]
fn test_config_file_changes_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("reindent.toml");
    fs::write(&config_path, "tab_width = 8\nindent_unit = 8\noutput_indent = 4\n").unwrap();

    let config = Config::from_toml_file(&config_path).unwrap();
    assert!(config.validate().is_none());

    let path = dir.path().join("a.cpp");
    write(&path, "\tx;\n    y;\n");
    let outcome = process_file(
        &path,
        &config.indent_params().unwrap(),
        OutputMode::Stdout,
        DEFAULT_MAX_FILE_SIZE,
    )
    .unwrap();
    let FileOutcome::Processed(file) = outcome else {
        panic!("file was skipped");
    };
    assert_eq!(file.output.as_deref(), Some(&b"    x;\n    y;\n"[..]));
    assert_eq!(file.diagnostics.len(), 1);
    assert_eq!(file.diagnostics[0].line_number, 2);
}

#[test]
fn test_discovered_config_applies_to_nested_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("reindent.toml"), "output_indent = 3\n").unwrap();
    let nested = dir.path().join("src/deep/a.cpp");
    write(&nested, "\tx;\n");

    let config = Config::from_discovered_files(&nested);
    assert_eq!(config.output_indent, 3);
    assert_eq!(config.tab_width, 4);
}

#[test]
fn test_zero_width_from_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("reindent.toml");
    fs::write(&config_path, "indent_unit = 0\n").unwrap();

    let config = Config::from_toml_file(&config_path).unwrap();
    assert!(config.validate().is_some());
    assert!(config.indent_params().is_err());
}
