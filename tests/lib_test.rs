//! Library integration tests.

mod common;

use common::{etcd_repo, setup_repo, Bundle};
use operator_repo::checks::{CheckEngine, EngineOptions, ResultKind, Suite};
use operator_repo::graph::{validate_operator, ChannelGraph, GraphOptions};
use operator_repo::repo::{load_repo, Resource, Selector};
use operator_repo::RepoError;

#[test]
fn error_types_are_public() {
    let err = RepoError::UnknownOperator {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> operator_repo::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn etcd_channel_resolves_head() {
    let temp = etcd_repo();
    let repo = load_repo(temp.path()).unwrap();
    let etcd = repo.operator("etcd").unwrap();

    let graph = ChannelGraph::build(etcd, "singlenamespace-alpha", Default::default());
    assert_eq!(graph.head().unwrap().dir_name(), "0.9.4");
    assert_eq!(validate_operator(etcd, GraphOptions::default()).count(), 0);
}

#[test]
fn recursive_run_checks_bundles_in_version_order() {
    let temp = setup_repo(&[
        Bundle::new("hello", "1.0.0"),
        Bundle::new("hello", "0.10.0"),
        Bundle::new("hello", "0.9.0"),
    ]);
    let repo = load_repo(temp.path()).unwrap();
    let suite = Suite::builtin(GraphOptions::default())
        .select(&["semver".to_string()], &[])
        .unwrap();
    let options = EngineOptions {
        recursive: true,
        report_passes: true,
    };
    let engine = CheckEngine::new(&suite, options);
    let targets = "hello".parse::<Selector>().unwrap().resolve(&repo).unwrap();

    let subjects: Vec<String> = engine
        .run(&repo, targets)
        .map(|r| {
            assert_eq!(r.kind, ResultKind::Pass);
            r.subject.to_string()
        })
        .collect();
    assert_eq!(subjects, vec!["hello/0.9.0", "hello/0.10.0", "hello/1.0.0"]);
}

#[test]
fn operator_is_expanded_before_its_bundles() {
    let temp = etcd_repo();
    let repo = load_repo(temp.path()).unwrap();
    let etcd = repo.operator("etcd").unwrap();

    let kinds: Vec<String> = Resource::Operator(etcd)
        .expand()
        .map(|r| r.subject().to_string())
        .collect();
    assert_eq!(
        kinds,
        vec!["etcd", "etcd/0.6.1", "etcd/0.9.0", "etcd/0.9.2", "etcd/0.9.4"]
    );
}
