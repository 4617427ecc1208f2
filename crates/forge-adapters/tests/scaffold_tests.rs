//! `init` against the built-in store, rendered in memory.

use std::path::Path;

use forge_adapters::{InMemoryStore, MemoryFilesystem, SimpleRenderer};
use forge_core::{
    application::{ApplicationError, ports::Filesystem},
    prelude::*,
};

fn service(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(SimpleRenderer::new()),
        Box::new(fs.clone()),
    )
}

#[test]
fn bash_service_lands_with_executable_entrypoint() {
    let fs = MemoryFilesystem::new();
    let done = service(&fs)
        .init(&InitRequest::new("service", "bash", "demo").with_output("/work/demo"))
        .unwrap();

    assert_eq!(done.dir, Path::new("/work/demo"));
    assert_eq!(fs.list_files().len(), 4);
    assert!(fs.is_executable(Path::new("/work/demo/main.sh")));

    let manifest = fs.read_file(Path::new("/work/demo/ops.yml")).unwrap();
    assert!(manifest.contains(r#"name: "demo:0.1.0""#));
    assert!(manifest.contains(r#"description: """#));
    assert!(manifest.contains("'8080:8080'"));
}

#[test]
fn existing_directory_needs_force() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new("/work/demo")).unwrap();

    let request = InitRequest::new("command", "python", "demo").with_output("/work/demo");
    let err = service(&fs).init(&request).unwrap_err();
    assert!(matches!(
        err,
        ForgeError::Application(ApplicationError::ProjectExists { .. })
    ));
    assert!(fs.list_files().is_empty());

    service(&fs).init(&request.with_force(true)).unwrap();
    assert!(
        fs.read_file(Path::new("/work/demo/requirements.txt"))
            .is_some()
    );
}
