//! # End-to-End Validation Scenarios
//!
//! Drives [`Validator`] with a typed subject carrying every capability: a
//! nested record, a collection of records with `dive`, display aliases,
//! message overrides, list and override scenes, a custom rule, and a
//! whole-object check.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use sceneval_core::{
    DocumentSubject, EngineError, Failures, FieldShape, MessageOverrides, MetadataError,
    RecordShape, RuleBook, Scene, SceneMap, Subject,
};
use sceneval_engine::{KeyStyle, Outcome, ValidationOptions, Validator};
use serde::Serialize;
use serde_json::json;

// -- Fixtures -----------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
struct Author {
    first_name: String,
    last_name: String,
    age: String,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Work {
    name: String,
    code: String,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Example {
    id: i64,
    title: String,
    author: Author,
    works: Vec<Work>,
}

impl Subject for Example {
    fn shape(&self) -> RecordShape {
        let author = RecordShape::new("Author")
            .field(FieldShape::new("first_name").alias("姓"))
            .field(FieldShape::new("last_name").alias("名"))
            .field(FieldShape::new("age").rules("CheckAge").alias("年龄"));
        let work = RecordShape::new("Work")
            .field(FieldShape::new("name").alias("名字"))
            .field(FieldShape::new("code").rules("required").alias("代码"));
        RecordShape::new("Example")
            .field(FieldShape::new("id").rules("required"))
            .field(FieldShape::new("title").rules("required").alias("标题"))
            .field(FieldShape::record("author", author))
            .field(
                FieldShape::records("works", work)
                    .rules("gt=0,dive,required")
                    .alias("公式"),
            )
    }

    fn scenes(&self) -> Result<SceneMap, MetadataError> {
        Ok(SceneMap::new()
            .scene("create", Scene::fields(["title", "works"]))
            .scene(
                "update",
                Scene::overrides([("id", ""), ("title", "len>10"), ("works", "len>2")]),
            )
            .scene("delete", Scene::fields(["id"]))
            .scene("noop", Scene::fields(Vec::<String>::new())))
    }

    fn message_overrides(&self) -> Result<MessageOverrides, MetadataError> {
        Ok([("required", "{0}是必须的"), ("CheckAge", "年龄不对")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    fn rule_book(&self) -> RuleBook {
        RuleBook::new()
            .value("CheckAge", |v| v.as_str() == Some("1"))
            .context("CheckAge2", |ctx| ctx.value().as_str() == Some("1"))
    }

    fn whole_check(&self, scene: &str) -> Result<Failures, MetadataError> {
        let mut warns = Failures::new();
        if scene == "delete" && self.id != 1 {
            warns.insert("id".to_string(), "id不能等于1".to_string());
        }
        Ok(warns)
    }
}

/// Helper: an instance where every field passes.
fn valid_example() -> Example {
    Example {
        id: 1,
        title: "标题".into(),
        author: Author {
            first_name: "A".into(),
            last_name: "B".into(),
            age: "1".into(),
        },
        works: vec![Work {
            name: "w".into(),
            code: "c1".into(),
        }],
    }
}

/// Helper: failures as a sorted list of `(key, message)`.
fn entries(outcome: &Outcome) -> Vec<(&str, &str)> {
    outcome
        .failures()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

// -- Scenes -------------------------------------------------------------------

#[test]
fn test_create_scene_reports_aliases() {
    let mut subject = valid_example();
    subject.title.clear();
    subject.works[0].code.clear();
    subject.author.age = "99".into();

    let outcome = Validator::new().validate(&subject, "create", None).unwrap();
    assert!(!outcome.passed());
    assert_eq!(
        entries(&outcome),
        vec![("title", "标题是必须的"), ("works[0].code", "代码是必须的")]
    );
}

#[test]
fn test_delete_scene_merges_whole_check() {
    let mut subject = valid_example();
    subject.id = 2;
    subject.title.clear();

    let outcome = Validator::new().validate(&subject, "delete", None).unwrap();
    assert_eq!(entries(&outcome), vec![("id", "id不能等于1")]);
}

#[test]
fn test_whole_check_never_overwrites_rule_failure() {
    let mut subject = valid_example();
    subject.id = 0;

    let outcome = Validator::new().validate(&subject, "delete", None).unwrap();
    assert_eq!(entries(&outcome), vec![("id", "id是必须的")]);
}

#[test]
fn test_override_scene_uses_declared_rules() {
    let mut subject = valid_example();
    subject.title = "short".into();
    subject.author.age = "7".into();

    // `title: len>10` is not applied; `author` is outside the scene.
    let outcome = Validator::new().validate(&subject, "update", None).unwrap();
    assert_eq!(outcome, Outcome::Pass);
}

#[test]
fn test_empty_scene_is_a_noop() {
    let outcome = Validator::new()
        .validate(&Example::default(), "noop", None)
        .unwrap();
    assert!(outcome.passed());
}

#[test]
fn test_undeclared_scene_validates_everything() {
    let subject = Example::default();
    let validator = Validator::new();
    let full = validator.validate(&subject, "", None).unwrap();
    let unknown = validator.validate(&subject, "archive", None).unwrap();
    assert_eq!(full, unknown);
    assert_eq!(
        entries(&full),
        vec![
            ("author.age", "年龄不对"),
            ("id", "id是必须的"),
            ("title", "标题是必须的"),
            ("works", "公式必须大于0项"),
        ]
    );
}

// -- Subjects without scenes --------------------------------------------------

#[derive(Serialize)]
struct Plain {
    name: String,
}

impl Subject for Plain {
    fn shape(&self) -> RecordShape {
        RecordShape::new("Plain").field(FieldShape::new("name").rules("required,alpha"))
    }
}

#[test]
fn test_no_scenes_any_scene_name_passes() {
    let outcome = Validator::new()
        .validate(&Plain { name: "ok".into() }, "anything", None)
        .unwrap();
    let (passed, failures) = outcome.into_parts();
    assert!(passed);
    assert!(failures.is_empty());
}

#[test]
fn test_no_scenes_english_catalog() {
    let outcome = Validator::new()
        .validate(&Plain { name: "r2d2".into() }, "", Some("en"))
        .unwrap();
    assert_eq!(
        entries(&outcome),
        vec![("name", "name can only contain alphabetic characters")]
    );
}

// -- Hard errors --------------------------------------------------------------

static GUARDED_CALLS: AtomicUsize = AtomicUsize::new(0);

#[derive(Serialize)]
struct BrokenMessages {
    code: String,
}

impl Subject for BrokenMessages {
    fn shape(&self) -> RecordShape {
        RecordShape::new("BrokenMessages").field(FieldShape::new("code").rules("Guarded"))
    }

    fn message_overrides(&self) -> Result<MessageOverrides, MetadataError> {
        Err(MetadataError::MessageShape {
            reason: "expected a mapping of rule kind to template, found array".into(),
        })
    }

    fn rule_book(&self) -> RuleBook {
        RuleBook::new().value("Guarded", |_| {
            GUARDED_CALLS.fetch_add(1, Ordering::SeqCst);
            false
        })
    }
}

#[test]
fn test_malformed_overrides_abort_before_rules() {
    let err = Validator::new()
        .validate(&BrokenMessages { code: "x".into() }, "", None)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Metadata(MetadataError::MessageShape { .. })
    ));
    assert_eq!(GUARDED_CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn test_descriptor_with_array_messages_is_hard_error() {
    let descriptor = json!({
        "record": "Doc",
        "fields": [{"key": "title", "rules": "required"}],
        "messages": ["required", "{0} missing"]
    });
    let subject = DocumentSubject::new(&descriptor, json!({"title": ""})).unwrap();
    let err = Validator::new().validate(&subject, "", None).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Metadata(MetadataError::MessageShape { .. })
    ));
}

#[test]
fn test_override_with_extra_placeholder_is_setup_error() {
    let descriptor = json!({
        "record": "Doc",
        "fields": [{"key": "title", "rules": "min=3"}],
        "messages": {"min": "{0} needs {1}"}
    });
    let subject = DocumentSubject::new(&descriptor, json!({"title": "ab"})).unwrap();
    let err = Validator::new().validate(&subject, "", None).unwrap_err();
    assert!(matches!(err, EngineError::Setup(_)));
}

#[derive(Serialize)]
struct Audited {
    title: String,
}

impl Subject for Audited {
    fn shape(&self) -> RecordShape {
        RecordShape::new("Audited").field(FieldShape::new("title").rules("required"))
    }

    fn whole_check(&self, scene: &str) -> Result<Failures, MetadataError> {
        Err(MetadataError::WholeCheckShape {
            scene: scene.to_string(),
            reason: "expected a mapping, found array".into(),
        })
    }
}

#[test]
fn test_malformed_whole_check_discards_rule_failures() {
    let err = Validator::new()
        .validate(&Audited { title: String::new() }, "publish", None)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Metadata(MetadataError::WholeCheckShape { ref scene, .. })
            if scene == "publish"
    ));
}

#[test]
fn test_descriptor_with_malformed_scenes_is_hard_error() {
    let descriptor = json!({
        "record": "Doc",
        "fields": [{"key": "title", "rules": "required"}],
        "scenes": {"create": "title"}
    });
    let subject = DocumentSubject::new(&descriptor, json!({"title": ""})).unwrap();
    let err = Validator::new().validate(&subject, "create", None).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Metadata(MetadataError::SceneShape { .. })
    ));
}

#[test]
fn test_descriptor_with_malformed_whole_check_is_hard_error() {
    let descriptor = json!({
        "record": "Doc",
        "fields": [{"key": "title", "rules": "required"}],
        "whole_check": {"delete": {"title": 1}}
    });
    let subject = DocumentSubject::new(&descriptor, json!({"title": ""})).unwrap();
    let err = Validator::new().validate(&subject, "delete", None).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Metadata(MetadataError::WholeCheckShape { ref scene, .. })
            if scene == "delete"
    ));
    // Scenes without an entry are unaffected.
    assert!(Validator::new().validate(&subject, "create", None).is_ok());
}

#[test]
fn test_unsupported_locale_is_setup_error() {
    let err = Validator::new()
        .validate(&valid_example(), "", Some("de"))
        .unwrap_err();
    assert_eq!(err.to_string(), "translator setup failed: unsupported locale 'de'");
}

// -- Descriptor-driven subjects -----------------------------------------------

#[test]
fn test_descriptor_subject_matches_typed_subject() {
    let descriptor = json!({
        "record": "Example",
        "fields": [
            {"key": "title", "rules": "required", "alias": "标题"},
            {"key": "works", "rules": "gt=0,dive,required", "alias": "公式",
             "list": {"record": {"name": "Work", "fields": [
                {"key": "code", "rules": "required", "alias": "代码"}
             ]}}}
        ],
        "scenes": {"create": ["title", "works"]},
        "messages": {"required": "{0}是必须的"}
    });
    let document = json!({"title": "", "works": [{"code": "a"}, {"code": ""}]});
    let subject = DocumentSubject::new(&descriptor, document).unwrap();
    let outcome = Validator::new().validate(&subject, "create", None).unwrap();
    assert_eq!(
        entries(&outcome),
        vec![("title", "标题是必须的"), ("works[1].code", "代码是必须的")]
    );
}

#[test]
fn test_descriptor_whole_check_merges_without_overwriting() {
    let descriptor = json!({
        "record": "Doc",
        "fields": [
            {"key": "id", "rules": "required"},
            {"key": "title", "rules": "required", "alias": "标题"}
        ],
        "scenes": {"delete": ["id"]},
        "whole_check": {"delete": {"id": "已发布的记录不能删除", "title": "标题已锁定"}}
    });
    let subject = DocumentSubject::new(&descriptor, json!({"id": 0, "title": ""})).unwrap();
    let outcome = Validator::new().validate(&subject, "delete", None).unwrap();
    assert_eq!(
        entries(&outcome),
        vec![("id", "id为必填字段"), ("title", "标题已锁定")]
    );
}

// -- Options ------------------------------------------------------------------

#[test]
fn test_alias_key_style_and_english_default() {
    let validator = Validator::with_options(ValidationOptions {
        default_locale: "en".parse().unwrap(),
        key_style: KeyStyle::Alias,
        ..ValidationOptions::default()
    });
    let mut subject = valid_example();
    subject.works[0].code.clear();
    let outcome = validator.validate(&subject, "", None).unwrap();
    assert_eq!(entries(&outcome), vec![("works[0].代码", "代码是必须的")]);
}

#[derive(Serialize)]
struct Post {
    title: String,
    summary: String,
}

impl Subject for Post {
    fn shape(&self) -> RecordShape {
        RecordShape::new("Post")
            .field(FieldShape::new("title").rules("required").alias("标题"))
            .field(FieldShape::new("summary").alias("摘要"))
    }

    fn whole_check(&self, _scene: &str) -> Result<Failures, MetadataError> {
        Ok([("title", "标题不合规"), ("summary", "摘要太短"), ("extra", "附加检查失败")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

#[test]
fn test_whole_check_keys_follow_key_style() {
    let post = Post {
        title: String::new(),
        summary: "s".into(),
    };

    let outcome = Validator::new().validate(&post, "", None).unwrap();
    assert_eq!(
        entries(&outcome),
        vec![
            ("extra", "附加检查失败"),
            ("summary", "摘要太短"),
            ("title", "标题为必填字段"),
        ]
    );

    let validator = Validator::with_options(ValidationOptions {
        key_style: KeyStyle::Alias,
        ..ValidationOptions::default()
    });
    let outcome = validator.validate(&post, "", None).unwrap();
    assert_eq!(
        entries(&outcome),
        vec![
            ("extra", "附加检查失败"),
            ("摘要", "摘要太短"),
            ("标题", "标题为必填字段"),
        ]
    );
}

#[test]
fn test_english_without_override_uses_catalog() {
    let outcome = Validator::new()
        .validate(&Plain { name: String::new() }, "", Some("en-GB"))
        .unwrap();
    assert_eq!(entries(&outcome), vec![("name", "name is a required field")]);
}

// -- Concurrency --------------------------------------------------------------

#[test]
fn test_validator_shared_across_threads() {
    let validator = Arc::new(Validator::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            std::thread::spawn(move || {
                let mut subject = valid_example();
                subject.id = i;
                validator.validate(&subject, "delete", None).map(|o| o.passed())
            })
        })
        .collect();
    let results: Vec<bool> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(results.iter().filter(|passed| **passed).count(), 1);
    assert_eq!(validator.registry().bound_types(), 1);
}

// -- Properties ---------------------------------------------------------------

fn arb_example() -> impl Strategy<Value = Example> {
    (
        0i64..4,
        "[a-z]{0,3}",
        "[0-9]{0,2}",
        prop::collection::vec("[a-z]{0,2}", 0..3),
    )
        .prop_map(|(id, title, age, codes)| Example {
            id,
            title,
            author: Author {
                age,
                ..Author::default()
            },
            works: codes
                .into_iter()
                .map(|code| Work {
                    name: String::new(),
                    code,
                })
                .collect(),
        })
}

proptest! {
    /// A scene selecting no fields produces no failures whatever the values.
    #[test]
    fn empty_scene_never_fails(subject in arb_example()) {
        let outcome = Validator::new().validate(&subject, "noop", None).unwrap();
        prop_assert!(outcome.passed());
    }

    /// A scene name with no declared scene behaves like full validation.
    #[test]
    fn unknown_scene_equals_full(subject in arb_example(), name in "[a-z]{1,8}") {
        prop_assume!(!["create", "update", "delete", "noop"].contains(&name.as_str()));
        let validator = Validator::new();
        let full = validator.validate(&subject, "", None).unwrap();
        let named = validator.validate(&subject, &name, None).unwrap();
        prop_assert_eq!(full, named);
    }
}
