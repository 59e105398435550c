use std::fs;

use tempfile::TempDir;

use super::*;
use crate::discover::{FsDiscoverer, RegistryDiscoverer};

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

struct Project {
    temp: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    fn pages(&self) -> PathBuf {
        self.temp.path().join("pages")
    }

    fn registry(&self) -> PathBuf {
        self.temp.path().join(".routegen/registry.json")
    }

    fn output(&self) -> PathBuf {
        self.temp.path().join("src/route-tree.gen.ts")
    }

    fn write_registry(&self, routes: &[&str]) {
        let pages: serde_json::Map<_, _> = routes
            .iter()
            .map(|route| (format!("/pages{route}"), serde_json::json!({ "route": route })))
            .collect();
        let json = serde_json::json!({ "pages": pages });
        fs::create_dir_all(self.registry().parent().unwrap()).unwrap();
        fs::write(self.registry(), json.to_string()).unwrap();
    }

    fn fs_compiler(&self) -> Compiler {
        Compiler::new(Box::new(FsDiscoverer::new(self.pages())), self.output(), None)
    }

    fn registry_compiler(&self) -> Compiler {
        Compiler::new(
            Box::new(RegistryDiscoverer::new(self.registry())),
            self.output(),
            Some("vike-react/usePageContext".into()),
        )
    }

    fn read_output(&self) -> String {
        fs::read_to_string(self.output()).unwrap()
    }
}

#[test]
fn test_build_start_emits() {
    let project = Project::new();
    touch(&project.pages(), "index/+Page.tsx");
    touch(&project.pages(), "profiles/@id/+Page.tsx");

    let mut compiler = project.fs_compiler();
    assert_eq!(compiler.on_build_start(), PassOutcome::Emitted { routes: 2 });

    let out = project.read_output();
    assert!(out.contains("\"/profiles/@id\": { \"id\": string };"));
    assert_eq!(compiler.last_emitted().map(RouteTable::len), Some(2));
}

#[test]
fn test_change_to_output_is_ignored() {
    let project = Project::new();
    touch(&project.pages(), "+Page.tsx");

    let mut compiler = project.fs_compiler();
    compiler.on_build_start();

    // Hand edits survive: nothing is rediscovered or rewritten
    fs::write(project.output(), "edited").unwrap();
    assert_eq!(compiler.on_change(&[project.output()]), PassOutcome::Ignored);
    assert_eq!(project.read_output(), "edited");

    assert_eq!(compiler.on_change(&[]), PassOutcome::Ignored);
}

#[test]
fn test_mixed_batch_reruns() {
    let project = Project::new();
    touch(&project.pages(), "+Page.tsx");

    let mut compiler = project.fs_compiler();
    compiler.on_build_start();

    touch(&project.pages(), "about/+Page.tsx");
    let outcome = compiler.on_change(&[project.output(), project.pages().join("about/+Page.tsx")]);
    assert_eq!(outcome, PassOutcome::Emitted { routes: 2 });
    assert!(project.read_output().contains("\"/about\""));
}

#[test]
fn test_fs_strategy_always_reemits() {
    let project = Project::new();
    touch(&project.pages(), "+Page.tsx");

    let mut compiler = project.fs_compiler();
    compiler.on_build_start();

    let changed = [project.pages().join("+Page.tsx")];
    assert_eq!(compiler.on_change(&changed), PassOutcome::Emitted { routes: 1 });
    assert_eq!(compiler.on_change(&changed), PassOutcome::Emitted { routes: 1 });
}

#[test]
fn test_registry_strategy_diffs() {
    let project = Project::new();
    project.write_registry(&["/", "/dashboard"]);

    let mut compiler = project.registry_compiler();
    assert_eq!(compiler.on_build_start(), PassOutcome::Emitted { routes: 2 });

    let changed = [project.registry()];
    assert_eq!(compiler.on_change(&changed), PassOutcome::Unchanged);

    project.write_registry(&["/", "/dashboard", "/catchall/*"]);
    assert_eq!(compiler.on_change(&changed), PassOutcome::Emitted { routes: 3 });
    assert!(project.read_output().contains("\"/catchall/@\": string[];"));

    // Same routes in a different order
    project.write_registry(&["/catchall/*", "/dashboard", "/"]);
    assert_eq!(compiler.on_change(&changed), PassOutcome::Unchanged);
}

#[test]
fn test_registry_build_start_always_emits() {
    let project = Project::new();
    project.write_registry(&["/"]);

    let mut compiler = project.registry_compiler();
    compiler.on_build_start();
    fs::remove_file(project.output()).unwrap();

    assert_eq!(compiler.on_build_start(), PassOutcome::Emitted { routes: 1 });
    assert!(project.read_output().contains("useParams"));
}

#[test]
fn test_missing_registry_first_pass_emits_empty() {
    let project = Project::new();
    let mut compiler = project.registry_compiler();

    assert_eq!(compiler.on_build_start(), PassOutcome::Emitted { routes: 0 });
    assert!(project.read_output().contains("export const pageRoutes = [] as const;"));
}

#[test]
fn test_broken_registry_keeps_previous_file() {
    let project = Project::new();
    project.write_registry(&["/", "/dashboard"]);

    let mut compiler = project.registry_compiler();
    compiler.on_build_start();
    let before = project.read_output();

    fs::write(project.registry(), "{ broken").unwrap();
    let outcome = compiler.on_change(&[project.registry()]);
    assert!(outcome.is_failed());
    assert_eq!(project.read_output(), before);
    assert_eq!(compiler.last_emitted().map(RouteTable::len), Some(2));
}

#[test]
fn test_emit_failure_is_reported() {
    let project = Project::new();
    touch(&project.pages(), "+Page.tsx");
    // A directory where the generated file should go
    fs::create_dir_all(project.output()).unwrap();

    let mut compiler = project.fs_compiler();
    let outcome = compiler.on_build_start();
    assert!(matches!(&outcome, PassOutcome::Failed(msg) if msg.contains("route-tree.gen.ts")));
    assert!(compiler.last_emitted().is_none());
}

#[test]
fn test_strategies_emit_identical_files() {
    let project = Project::new();
    touch(&project.pages(), "index/+Page.tsx");
    touch(&project.pages(), "catchall/+Page.tsx");
    fs::write(
        project.pages().join("catchall/+route.ts"),
        r#"export default "/catchall/*""#,
    )
    .unwrap();
    touch(&project.pages(), "profiles/@id/+Page.tsx");
    project.write_registry(&["/", "/catchall/*", "/profiles/@id"]);

    Compiler::new(Box::new(FsDiscoverer::new(project.pages())), project.output(), None)
        .on_build_start();
    let from_fs = project.read_output();

    Compiler::new(Box::new(RegistryDiscoverer::new(project.registry())), project.output(), None)
        .on_build_start();
    let from_registry = project.read_output();

    assert_eq!(from_fs, from_registry);
}
