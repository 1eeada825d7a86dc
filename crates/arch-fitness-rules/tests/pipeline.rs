//! End-to-end runs over fixture projects: config, policy, graph, checks, report.

use std::fs;
use std::path::Path;

use arch_fitness_core::{Config, PolicyError, Runner, Severity};
use arch_fitness_rules::{all_checks, build_policy};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn import(spec: &str) -> String {
    format!("import {{ x }} from '{spec}';\n")
}

/// A small NestJS-style project that follows every built-in rule.
fn clean_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "src/app.module.ts",
        &(import("./notes/notes.module") + &import("./tags/tags.module")),
    );
    write(root, "src/notes/notes.module.ts", &import("./apps/notes.controller"));
    write(root, "src/notes/apps/notes.controller.ts", &import("./notes.app-service"));
    write(root, "src/notes/apps/notes.app-service.ts", &import("../domain/note.service"));
    write(
        root,
        "src/notes/domain/note.service.ts",
        &(import("../../tags/domain/aggregators/tag.aggregator") + &import("../../shared/clock")),
    );
    write(root, "src/tags/tags.module.ts", &import("./domain/aggregators/tag.aggregator"));
    write(root, "src/tags/domain/aggregators/tag.aggregator.ts", &import("../tag.repository"));
    write(root, "src/tags/domain/tag.repository.ts", "export class TagRepository {}\n");
    write(root, "src/shared/clock.ts", "export const now = () => new Date();\n");
    write(root, "src/notes/domain/__specs__/note.service.spec.ts", &import("../note.service"));
    tmp
}

fn run(tmp: &TempDir, toml: &str) -> arch_fitness_core::RunReport {
    let config = Config::parse(toml).unwrap();
    let policy = build_policy(&config, tmp.path()).unwrap();
    Runner::new(all_checks()).run(&policy)
}

#[test]
fn clean_project_passes_every_check() {
    let tmp = clean_project();
    let report = run(&tmp, "");

    assert_eq!(report.checks.len(), all_checks().len());
    for outcome in &report.checks {
        assert!(outcome.error.is_none(), "{} failed: {:?}", outcome.name, outcome.error);
        assert!(outcome.violations.is_empty(), "{}: {:?}", outcome.name, outcome.violations);
    }
    assert!(report.is_success());
}

#[test]
fn boundary_scenarios() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "src/notes/domain/a.service.ts",
        &(import("./b.service")
            + &import("../../check-items/domain/aggregators/x.aggregator")
            + &import("../../check-items/domain/services/y.service")),
    );
    write(root, "src/notes/domain/b.service.ts", "export class B {}\n");
    write(root, "src/check-items/domain/aggregators/x.aggregator.ts", "export class X {}\n");
    write(root, "src/check-items/domain/services/y.service.ts", "export class Y {}\n");
    write(root, "src/shared-kernel/clock.ts", &import("../notes/domain/anything"));
    write(root, "src/notes/domain/anything.ts", &import("../../shared-kernel/clock"));

    let report = run(&tmp, "");
    let graph = report.checks.iter().find(|c| c.name == "dependency-rules").unwrap();
    let mut found: Vec<(String, String, String)> = graph
        .violations
        .iter()
        .map(|v| {
            (
                v.rule.clone(),
                v.location.file.clone(),
                v.target().unwrap_or_default().to_string(),
            )
        })
        .collect();
    found.sort();

    let a = "src/notes/domain/a.service.ts";
    let b = "src/notes/domain/b.service.ts";
    let y = "src/check-items/domain/services/y.service.ts";
    assert_eq!(
        found,
        vec![
            ("domain-module-boundary".to_string(), a.to_string(), y.to_string()),
            ("services-no-other-services".to_string(), a.to_string(), b.to_string()),
            ("services-no-other-services".to_string(), a.to_string(), y.to_string()),
        ]
    );
    assert!(!report.is_success());

    let boundary = graph
        .violations
        .iter()
        .find(|v| v.rule == "domain-module-boundary")
        .unwrap();
    insta::assert_snapshot!(
        boundary.to_string(),
        @"src/notes/domain/a.service.ts -> src/check-items/domain/services/y.service.ts: error [domain-module-boundary] Domain modules may only import other domain modules through their aggregators, ports or module files"
    );
}

#[test]
fn naming_violations_are_grouped_per_check() {
    let tmp = clean_project();
    let root = tmp.path();
    write(root, "src/notes/domain/note.dto.ts", "export class NoteDto {}\n");
    write(root, "src/notes/domain/types/note.ts", "export type Note = {};\n");
    write(root, "src/notes/domain/queries/list.param.ts", "export type P = {};\n");
    write(root, "src/tags/domain/tag.type.ts", "export type Tag = {};\n");
    write(
        root,
        "src/notes/apps/actions/dtos/requests/list.request.ts",
        "export class ListRequest {}\n",
    );

    let report = run(&tmp, "[rules.no-orphans]\nenabled = false\n");
    let count = |name: &str| {
        report
            .checks
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.violations.len())
            .unwrap()
    };

    assert_eq!(count("no-dto-filename-in-domain"), 1);
    assert_eq!(count("no-dto-type-in-domain"), 1);
    assert_eq!(count("no-types-folder"), 1);
    assert_eq!(count("param-colocation"), 1);
    assert_eq!(count("no-generic-type-files"), 1);
    assert_eq!(count("dto-colocation"), 1);
    assert_eq!(count("dependency-rules"), 0);
}

#[test]
fn fail_on_threshold_ignores_orphan_warnings() {
    let tmp = clean_project();
    write(tmp.path(), "src/notes/domain/unused.ts", "export const unused = 1;\n");

    let strict = run(&tmp, "");
    assert!(!strict.is_success());
    let (errors, warnings, _) = strict.counts();
    assert_eq!((errors, warnings), (0, 1));

    let lenient = run(&tmp, "fail_on = \"error\"\n");
    assert_eq!(lenient.fail_on, Severity::Error);
    assert!(lenient.is_success());
}

#[test]
fn custom_forbidden_rule_is_evaluated() {
    let tmp = clean_project();
    let report = run(
        &tmp,
        r#"
[[forbidden]]
name = "no-shared-from-domain"
severity = "warn"
from = { path = "^{root}/[^/]+/domain/" }
to = { path = "^{root}/shared/" }
"#,
    );
    let found: Vec<&str> = report.violations().map(|v| v.rule.as_str()).collect();
    assert_eq!(found, vec!["no-shared-from-domain"]);
}

#[test]
fn imports_of_excluded_spec_and_migration_files_are_reported() {
    let tmp = clean_project();
    let root = tmp.path();
    let migration = "src/database/migrations/1700000000-init.ts";
    write(root, "src/notes/domain/__specs__/note.fixture.ts", "export const fixture = {};\n");
    write(root, migration, "export class Init1700000000 {}\n");
    write(root, "src/database/data-source.ts", &import("./migrations/1700000000-init"));
    write(
        root,
        "src/notes/domain/note.factory.ts",
        &(import("./__specs__/note.fixture") + &import("../../database/migrations/1700000000-init")),
    );

    let report = run(&tmp, "");
    let mut found: Vec<(&str, &str, &str)> = report
        .violations()
        .map(|v| (v.rule.as_str(), v.location.file.as_str(), v.target().unwrap_or_default()))
        .collect();
    found.sort_unstable();

    let factory = "src/notes/domain/note.factory.ts";
    assert_eq!(
        found,
        vec![
            ("not-to-migrations", factory, migration),
            ("not-to-spec", factory, "src/notes/domain/__specs__/note.fixture.ts"),
        ]
    );
}

#[test]
fn dot_prefixed_root_enforces_the_same_rules() {
    let tmp = clean_project();
    write(
        tmp.path(),
        "src/notes/domain/tag-lookup.ts",
        &import("../../tags/domain/tag.repository"),
    );
    let rules = |toml: &str| -> Vec<String> { run(&tmp, toml).violations().map(|v| v.rule.clone()).collect() };

    let plain = rules("[analyzer]\nroot = \"src\"\n");
    assert_eq!(plain, vec!["domain-module-boundary"]);
    assert_eq!(rules("[analyzer]\nroot = \"./src\"\n"), plain);
    assert_eq!(rules("[analyzer]\nroot = \"src/\"\n"), plain);
}

#[test]
fn invalid_policy_fails_before_scanning() {
    let config = Config::parse(
        r#"
[[forbidden]]
name = "broken"
from = { path = "(" }
to = { path = "x" }
"#,
    )
    .unwrap();
    let err = build_policy(&config, Path::new("/nonexistent")).unwrap_err();
    assert!(matches!(err, PolicyError::Pattern { .. }));
}

#[test]
fn selection_runs_only_requested_checks() {
    let tmp = clean_project();
    write(tmp.path(), "src/notes/domain/note.dto.ts", "export class NoteDto {}\n");
    let policy = build_policy(&Config::default(), tmp.path()).unwrap();

    let runner = Runner::new(all_checks())
        .select(&["no-dto-type-in-domain".to_string()], &[])
        .unwrap();
    let report = runner.run(&policy);
    assert_eq!(report.checks.len(), 1);
    assert_eq!(report.checks[0].violations[0].location.line, Some(1));

    let err = Runner::new(all_checks())
        .select(&[], &["no-such-check".to_string()])
        .err()
        .unwrap();
    assert!(matches!(err, PolicyError::UnknownCheck { .. }));
}
