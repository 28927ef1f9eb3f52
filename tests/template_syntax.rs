use std::fs;
use std::path::Path;

use tempfile::TempDir;

use portico::error::ConfigurationError;
use portico::syntax;

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn balanced_corpus_passes() {
    let tmp = TempDir::new().unwrap();
    write_file(
        tmp.path(),
        "base.html",
        "<!doctype html>\n{% block content %}{% endblock %}\n",
    );
    write_file(
        tmp.path(),
        "dashboard.html",
        "{% block content %}\n{% for repo in repos %}\n<li>{{ repo.name }}</li>\n{% endfor %}\n{% endblock %}\n",
    );

    let report = syntax::check(tmp.path()).unwrap();
    assert!(report.passes());
    assert!(report.issues.is_empty());
}

#[test]
fn issues_name_file_and_line() {
    let tmp = TempDir::new().unwrap();
    write_file(
        tmp.path(),
        "partials/nav.html",
        "<nav>\n{% if user %}\n<a href=\"/dashboard\">Home</a>\n</nav>\n",
    );

    let report = syntax::check(tmp.path()).unwrap();

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].source_file, "partials/nav.html");
    assert_eq!(report.issues[0].line, 2);
    assert!(report.issues[0].message.contains("never closed"));
}

#[test]
fn issues_from_multiple_files_are_all_reported() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a.html", "{% if x %}\n");
    write_file(tmp.path(), "b.html", "{% endfor %}\n");

    let report = syntax::check(tmp.path()).unwrap();

    assert_eq!(report.issues.len(), 2);
    assert_eq!(report.issues[0].source_file, "a.html");
    assert_eq!(report.issues[1].source_file, "b.html");
    assert!(!report.passes());
}

#[test]
fn check_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "index.html", "{% if user %}\n{% for x in xs %}\n");

    let first = syntax::check(tmp.path()).unwrap();
    let second = syntax::check(tmp.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_root_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();

    let err = syntax::check(&tmp.path().join("templates")).unwrap_err();
    assert!(matches!(err, ConfigurationError::TemplateRootMissing(_)));
}

#[test]
fn expression_braces_are_not_block_tags() {
    let tmp = TempDir::new().unwrap();
    write_file(
        tmp.path(),
        "index.html",
        "<title>{{ title }}</title>\n<p>{{ user.name }}</p>\n",
    );

    let report = syntax::check(tmp.path()).unwrap();
    assert!(report.passes());
}
