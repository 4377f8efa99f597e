use std::cell::RefCell;
use std::collections::VecDeque;

use ahoy::config::{parse_config, ConfigFormat, Field, FieldType, Widget};
use ahoy::constants::LICENSES;
use ahoy::error::{Error, Result};
use ahoy::parser::{
    accept_preloaded, build_context, default_questions, parse_answers, Question, QuestionKind,
};
use ahoy::prompt::{Prompter, Validator};
use ahoy::settings::Settings;
use ahoy::validation::Validation;
use serde_json::{json, Value};

/// Prompter replaying scripted replies in order and recording every message.
#[derive(Default)]
struct ScriptedPrompter {
    replies: RefCell<VecDeque<Value>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(replies: Vec<Value>) -> Self {
        Self { replies: RefCell::new(replies.into()), asked: RefCell::default() }
    }

    fn next(&self, message: &str) -> Value {
        self.asked.borrow_mut().push(message.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {message}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(
        &self,
        message: &str,
        initial: Option<&str>,
        validator: Validator<'_>,
    ) -> Result<String> {
        let reply = match self.next(message) {
            Value::Null => initial.unwrap_or_default().to_string(),
            Value::String(text) => text,
            other => other.to_string(),
        };
        validator(reply.as_str()).map_err(Error::ValidationError)?;
        Ok(reply)
    }

    fn password(&self, message: &str, validator: Validator<'_>) -> Result<String> {
        self.input(message, None, validator)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Ok(self.next(message).as_bool().unwrap_or(default))
    }

    fn select(&self, message: &str, _items: &[&str], default: usize) -> Result<usize> {
        Ok(self.next(message).as_u64().map_or(default, |i| i as usize))
    }

    fn fuzzy_select(&self, message: &str, items: &[&str], default: usize) -> Result<usize> {
        self.select(message, items, default)
    }

    fn multi_select(
        &self,
        message: &str,
        _items: &[&str],
        defaults: &[bool],
    ) -> Result<Vec<usize>> {
        match self.next(message) {
            Value::Array(picked) => {
                Ok(picked.iter().filter_map(Value::as_u64).map(|i| i as usize).collect())
            }
            _ => Ok(defaults.iter().enumerate().filter(|(_, on)| **on).map(|(i, _)| i).collect()),
        }
    }
}

fn base_answers() -> Value {
    json!({
        "skeleton_name": "my-app",
        "skeleton_description": "An app",
        "skeleton_author": "Jane",
        "skeleton_keywords": ["cli"],
        "skeleton_version": "0.1.0",
        "skeleton_license": "mit",
        "skeleton_repository": "",
    })
}

fn field(name: &str, field_type: FieldType) -> Field {
    Field {
        name: name.to_string(),
        field_type,
        message: None,
        initial: None,
        required: true,
        choices: Vec::new(),
        widget: None,
    }
}

#[test]
fn test_default_questions() {
    let settings = Settings {
        author: Some("Jane".to_string()),
        license: Some("mit".to_string()),
        ..Settings::default()
    };

    let questions = default_questions(&settings);
    let names: Vec<&str> = questions.iter().map(|q| q.name.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "skeleton_name",
            "skeleton_description",
            "skeleton_author",
            "skeleton_keywords",
            "skeleton_version",
            "skeleton_license",
            "skeleton_repository",
        ]
    );
    assert!(questions[0].required);
    assert_eq!(questions[0].validation, Some(Validation::Slug));
    assert_eq!(questions[2].initial, Some(json!("Jane")));
    assert_eq!(questions[3].kind, QuestionKind::List);
    assert_eq!(questions[5].kind, QuestionKind::SingleChoice);
    assert_eq!(questions[5].choices.len(), LICENSES.len());
    assert_eq!(questions[5].initial, Some(json!("mit")));
}

#[test]
fn test_preloaded_answers_skip_prompts() {
    let config = parse_config("fields:\n  - name: port\n    type: number\n", ConfigFormat::Yaml)
        .unwrap();
    let mut preloaded = base_answers();
    preloaded["port"] = json!("8080");
    let prompt = ScriptedPrompter::default();

    let context = build_context(&config, &Settings::default(), &prompt, &preloaded).unwrap();

    assert!(prompt.asked.borrow().is_empty());
    assert_eq!(context["skeleton_name"], "my-app");
    assert_eq!(context["port"], 8080);
}

#[test]
fn test_missing_answers_are_prompted_in_order() {
    let config = parse_config(
        r#"{ "fields": [
            { "name": "database", "type": "select", "choices": [
                { "title": "PostgreSQL", "value": "postgres" },
                { "title": "SQLite", "value": "sqlite" }
            ] },
            { "name": "ci", "type": "checkbox", "message": "Enable CI?" }
        ] }"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let prompt = ScriptedPrompter::new(vec![json!(1), json!(true)]);

    let context = build_context(&config, &Settings::default(), &prompt, &base_answers()).unwrap();

    assert_eq!(*prompt.asked.borrow(), vec!["database", "Enable CI?"]);
    assert_eq!(context["database"], "sqlite");
    assert_eq!(context["ci"], true);
}

#[test]
fn test_context_holds_every_answer() {
    let config = parse_config("fields:\n  - name: zeta\n  - name: alpha\n", ConfigFormat::Yaml)
        .unwrap();
    let mut preloaded = base_answers();
    preloaded["alpha"] = json!("a");
    preloaded["zeta"] = json!("z");
    let prompt = ScriptedPrompter::default();

    let context = build_context(&config, &Settings::default(), &prompt, &preloaded).unwrap();

    let answers = context.as_object().unwrap();
    assert_eq!(answers.len(), 9);
    assert_eq!(answers["zeta"], "z");
    assert_eq!(answers["alpha"], "a");
}

#[test]
fn test_invalid_preloaded_name_is_rejected() {
    let mut preloaded = base_answers();
    preloaded["skeleton_name"] = json!("my project");
    let prompt = ScriptedPrompter::default();

    let result = build_context(&Default::default(), &Settings::default(), &prompt, &preloaded);

    match result {
        Err(Error::ValidationError(message)) => assert!(message.starts_with("skeleton_name")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_prompted_text_is_validated() {
    let mut preloaded = base_answers();
    preloaded.as_object_mut().unwrap().remove("skeleton_name");
    let prompt = ScriptedPrompter::new(vec![json!("")]);

    let result = build_context(&Default::default(), &Settings::default(), &prompt, &preloaded);

    match result {
        Err(Error::ValidationError(message)) => assert_eq!(message, "This field is required"),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_keywords_are_split() {
    let questions = default_questions(&Settings::default());
    let keywords = &questions[3];

    assert_eq!(
        accept_preloaded(keywords, &json!("cli, tool,,rust ")).unwrap(),
        json!(["cli", "tool", "rust"])
    );
    assert_eq!(accept_preloaded(keywords, &json!(["a", "b"])).unwrap(), json!(["a", "b"]));
    assert!(accept_preloaded(keywords, &json!(3)).is_err());
}

#[test]
fn test_preloaded_shapes() {
    let mut checkbox = field("ci", FieldType::Checkbox);
    checkbox.required = false;
    let checkbox = Question::from_field(&checkbox);
    assert_eq!(accept_preloaded(&checkbox, &json!(false)).unwrap(), json!(false));
    assert!(accept_preloaded(&checkbox, &json!("yes")).is_err());

    let mut select = field("db", FieldType::Select);
    select.choices = serde_json::from_value(json!(["postgres", "sqlite"])).unwrap();
    let select = Question::from_field(&select);
    assert_eq!(accept_preloaded(&select, &json!("sqlite")).unwrap(), json!("sqlite"));
    assert!(accept_preloaded(&select, &json!("oracle")).is_err());

    let mut multi = field("features", FieldType::MultiSelect);
    multi.choices = serde_json::from_value(json!(["auth", "admin", "api"])).unwrap();
    let multi = Question::from_field(&multi);
    assert_eq!(accept_preloaded(&multi, &json!(["api"])).unwrap(), json!(["api"]));
    assert!(accept_preloaded(&multi, &json!(["api", "ftp"])).is_err());

    let email = Question::from_field(&field("contact", FieldType::Email));
    assert!(accept_preloaded(&email, &json!("a@b.io")).is_ok());
    assert!(accept_preloaded(&email, &json!("not-an-email")).is_err());
}

#[test]
fn test_multi_select_prompt() {
    let mut multi = field("features", FieldType::MultiSelect);
    multi.choices = serde_json::from_value(json!([
        { "title": "Authentication", "value": "auth" },
        "admin",
        "api"
    ]))
    .unwrap();
    multi.initial = Some(json!(["admin"]));
    let config = ahoy::config::SkeletonConfig { fields: vec![multi], ..Default::default() };
    let prompt = ScriptedPrompter::new(vec![Value::Null]);

    let context = build_context(&config, &Settings::default(), &prompt, &base_answers()).unwrap();

    assert_eq!(context["features"], json!(["admin"]));
}

#[test]
fn test_question_kinds() {
    assert_eq!(QuestionKind::for_field(FieldType::Checkbox, None), QuestionKind::YesNo);
    assert_eq!(QuestionKind::for_field(FieldType::Range, None), QuestionKind::Number);
    assert_eq!(QuestionKind::for_field(FieldType::Radio, None), QuestionKind::SingleChoice);
    assert_eq!(QuestionKind::for_field(FieldType::Date, None), QuestionKind::Text);
    assert_eq!(
        QuestionKind::for_field(FieldType::Select, Some(Widget::Autocomplete)),
        QuestionKind::Autocomplete
    );
    assert_eq!(
        QuestionKind::for_field(FieldType::Text, Some(Widget::Toggle)),
        QuestionKind::YesNo
    );
}

#[test]
fn test_date_field_message_shows_mask() {
    let mut date = field("released", FieldType::Date);
    date.message = Some("Release date".to_string());

    let question = Question::from_field(&date);

    assert!(question.message.starts_with("Release date ("));
    assert_eq!(question.kind, QuestionKind::Text);
}

#[test]
fn test_number_prompt() {
    let config = ahoy::config::SkeletonConfig {
        fields: vec![field("workers", FieldType::Number)],
        ..Default::default()
    };
    let prompt = ScriptedPrompter::new(vec![json!("4")]);

    let context = build_context(&config, &Settings::default(), &prompt, &base_answers()).unwrap();

    assert_eq!(context["workers"], 4);
}

#[test]
fn test_parse_answers() {
    assert_eq!(parse_answers("").unwrap(), Value::Null);
    assert_eq!(parse_answers("  \n").unwrap(), Value::Null);
    assert_eq!(parse_answers(r#"{"a": 1}"#).unwrap(), json!({ "a": 1 }));
    assert!(matches!(parse_answers("[1, 2]"), Err(Error::ConfigError(_))));
    assert!(matches!(parse_answers("{oops"), Err(Error::ConfigError(_))));
}

#[test]
fn test_non_finite_numbers_are_rejected() {
    let workers = Question::from_field(&field("workers", FieldType::Number));

    for input in ["inf", "-inf", "NaN", "1e999"] {
        assert!(
            matches!(accept_preloaded(&workers, &json!(input)), Err(Error::ValidationError(_))),
            "{input} should be rejected"
        );
    }
    assert_eq!(accept_preloaded(&workers, &json!("2.5")).unwrap(), json!(2.5));
}
