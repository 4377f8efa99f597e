//! Turns the built-in questions and a skeleton's fields into the answer
//! context used for rendering.

use crate::config::{Choice, Field, FieldType, SkeletonConfig, Widget};
use crate::constants::{date_mask, LICENSES, PROJECT_NAME_VAR};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::settings::Settings;
use crate::validation::{check_text, Validation};
use serde_json::Value;
use std::io::Read;

/// Terminal prompt a question is asked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    Number,
    Password,
    YesNo,
    SingleChoice,
    Autocomplete,
    MultipleChoice,
    List,
}

impl QuestionKind {
    /// Maps a field's type and widget to a prompt; the widget wins.
    pub fn for_field(field_type: FieldType, widget: Option<Widget>) -> Self {
        match widget {
            Some(Widget::Toggle) => return QuestionKind::YesNo,
            Some(Widget::List) => return QuestionKind::List,
            Some(Widget::Autocomplete) => return QuestionKind::Autocomplete,
            Some(Widget::Slug) => return QuestionKind::Text,
            None => {}
        }
        match field_type {
            FieldType::Checkbox => QuestionKind::YesNo,
            FieldType::Number | FieldType::Range => QuestionKind::Number,
            FieldType::Password => QuestionKind::Password,
            FieldType::Radio | FieldType::Select => QuestionKind::SingleChoice,
            FieldType::MultiSelect => QuestionKind::MultipleChoice,
            _ => QuestionKind::Text,
        }
    }
}

/// A question ready to be asked.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub name: String,
    pub message: String,
    pub kind: QuestionKind,
    pub initial: Option<Value>,
    pub choices: Vec<Choice>,
    pub required: bool,
    pub validation: Option<Validation>,
}

impl Question {
    fn text(name: &str, message: &str, initial: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: QuestionKind::Text,
            initial: initial.map(|initial| Value::String(initial.to_string())),
            choices: Vec::new(),
            required: false,
            validation: None,
        }
    }

    /// Builds the question a skeleton field declares.
    pub fn from_field(field: &Field) -> Self {
        let kind = QuestionKind::for_field(field.field_type, field.widget);
        let validation = match (field.widget, field.field_type) {
            (Some(Widget::Slug), _) => Some(Validation::Slug),
            (_, FieldType::Color) => Some(Validation::Color),
            (_, FieldType::Email) => Some(Validation::Email),
            (_, FieldType::Url) => Some(Validation::Url),
            (_, FieldType::Tel) => Some(Validation::Tel),
            _ if kind == QuestionKind::Number => Some(Validation::Number),
            _ => None,
        };
        let message = match date_mask(field.field_type.as_str()) {
            Some(mask) if kind == QuestionKind::Text => format!("{} ({mask})", field.message()),
            _ => field.message().to_string(),
        };

        Self {
            name: field.name.clone(),
            message,
            kind,
            initial: field.initial.clone(),
            choices: field.choices.clone(),
            required: field.required,
            validation,
        }
    }

    fn initial_str(&self) -> Option<String> {
        match &self.initial {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Index of the initially highlighted choice: the choice whose value
    /// equals `initial`, or `initial` itself when it is an index.
    fn initial_index(&self) -> usize {
        match &self.initial {
            Some(Value::String(s)) => {
                self.choices.iter().position(|choice| choice.value() == s.as_str()).unwrap_or(0)
            }
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|i| i as usize)
                .filter(|i| *i < self.choices.len())
                .unwrap_or(0),
            _ => 0,
        }
    }

    fn initial_selection(&self) -> Vec<bool> {
        let selected: Vec<&str> = match &self.initial {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(s)) => vec![s.as_str()],
            _ => Vec::new(),
        };
        self.choices.iter().map(|choice| selected.contains(&choice.value())).collect()
    }

    fn validate(&self, input: &str) -> std::result::Result<(), String> {
        check_text(input, self.required, self.validation)
    }

    fn choice_titles(&self) -> Result<Vec<&str>> {
        if self.choices.is_empty() {
            return Err(Error::ConfigError(format!("field '{}' has no choices", self.name)));
        }
        Ok(self.choices.iter().map(Choice::title).collect())
    }
}

/// The questions asked for every skeleton, seeded from the user settings.
pub fn default_questions(settings: &Settings) -> Vec<Question> {
    let mut name = Question::text(PROJECT_NAME_VAR, "Project Name", None);
    name.required = true;
    name.validation = Some(Validation::Slug);

    let mut keywords = Question::text("skeleton_keywords", "Project Keywords", None);
    keywords.kind = QuestionKind::List;

    let license = Question {
        name: "skeleton_license".to_string(),
        message: "Project License".to_string(),
        kind: QuestionKind::SingleChoice,
        initial: settings.license.clone().map(Value::String),
        choices: LICENSES
            .iter()
            .map(|(title, value)| Choice::Titled {
                title: title.to_string(),
                value: value.to_string(),
            })
            .collect(),
        required: false,
        validation: None,
    };

    vec![
        name,
        Question::text("skeleton_description", "Project Description", None),
        Question::text("skeleton_author", "Project Author", settings.author.as_deref()),
        keywords,
        Question::text("skeleton_version", "Project Version", settings.version.as_deref()),
        license,
        Question::text("skeleton_repository", "Project Repository", None),
    ]
}

fn split_list(input: &str) -> Value {
    Value::Array(
        input
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect(),
    )
}

fn parse_number(input: &str) -> Value {
    let input = input.trim();
    if input.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = input.parse::<i64>() {
        return Value::from(n);
    }
    input
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// Checks a preloaded answer against its question and normalizes it.
///
/// # Errors
/// * `Error::ValidationError` if the value has the wrong shape, fails the
///   field's validator or is not one of the choices
pub fn accept_preloaded(question: &Question, value: &Value) -> Result<Value> {
    let invalid = |reason: String| Error::ValidationError(format!("{}: {reason}", question.name));

    match question.kind {
        QuestionKind::YesNo => match value {
            Value::Bool(_) => Ok(value.clone()),
            _ => Err(invalid("expected a boolean".to_string())),
        },
        QuestionKind::Number => {
            let text = match value {
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                _ => return Err(invalid("expected a number".to_string())),
            };
            question.validate(&text).map_err(invalid)?;
            Ok(parse_number(&text))
        }
        QuestionKind::Text | QuestionKind::Password => match value {
            Value::String(s) => {
                question.validate(s).map_err(invalid)?;
                Ok(value.clone())
            }
            _ => Err(invalid("expected a string".to_string())),
        },
        QuestionKind::SingleChoice | QuestionKind::Autocomplete => match value {
            Value::String(s) if question.choices.iter().any(|c| c.value() == s.as_str()) => {
                Ok(value.clone())
            }
            _ => Err(invalid(format!("{value} is not one of the choices"))),
        },
        QuestionKind::MultipleChoice => match value {
            Value::Array(items)
                if items.iter().all(|item| {
                    item.as_str()
                        .is_some_and(|s| question.choices.iter().any(|c| c.value() == s))
                }) =>
            {
                Ok(value.clone())
            }
            _ => Err(invalid(format!("{value} is not a list of choices"))),
        },
        QuestionKind::List => match value {
            Value::Array(items) if items.iter().all(Value::is_string) => Ok(value.clone()),
            Value::String(s) => Ok(split_list(s)),
            _ => Err(invalid("expected a list of strings".to_string())),
        },
    }
}

/// Asks a single question.
pub fn ask(prompt: &dyn Prompter, question: &Question) -> Result<Value> {
    let validator = |input: &str| question.validate(input);
    let message = question.message.as_str();

    let value = match question.kind {
        QuestionKind::Text => {
            let initial = question.initial_str();
            Value::String(prompt.input(message, initial.as_deref(), &validator)?)
        }
        QuestionKind::Number => {
            let initial = question.initial_str();
            parse_number(&prompt.input(message, initial.as_deref(), &validator)?)
        }
        QuestionKind::Password => Value::String(prompt.password(message, &validator)?),
        QuestionKind::YesNo => {
            let default = question.initial.as_ref().and_then(Value::as_bool).unwrap_or(false);
            Value::Bool(prompt.confirm(message, default)?)
        }
        QuestionKind::SingleChoice | QuestionKind::Autocomplete => {
            let items = question.choice_titles()?;
            let index = if question.kind == QuestionKind::Autocomplete {
                prompt.fuzzy_select(message, &items, question.initial_index())?
            } else {
                prompt.select(message, &items, question.initial_index())?
            };
            let choice = question.choices.get(index).ok_or_else(|| {
                Error::ValidationError(format!("{}: no choice at index {index}", question.name))
            })?;
            Value::String(choice.value().to_string())
        }
        QuestionKind::MultipleChoice => {
            let items = question.choice_titles()?;
            let picked = prompt.multi_select(message, &items, &question.initial_selection())?;
            Value::Array(
                picked
                    .into_iter()
                    .filter_map(|index| question.choices.get(index))
                    .map(|choice| Value::String(choice.value().to_string()))
                    .collect(),
            )
        }
        QuestionKind::List => {
            let initial = match &question.initial {
                Some(Value::Array(items)) => Some(
                    items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", "),
                ),
                _ => question.initial_str(),
            };
            split_list(&prompt.input(message, initial.as_deref(), &validator)?)
        }
    };
    Ok(value)
}

/// Answers every question in order, taking preloaded answers where present.
pub fn get_answers(
    prompt: &dyn Prompter,
    questions: &[Question],
    preloaded: &Value,
) -> Result<Value> {
    let mut answers = serde_json::Map::new();
    for question in questions {
        let value = match preloaded.get(&question.name) {
            Some(value) => accept_preloaded(question, value)?,
            None => ask(prompt, question)?,
        };
        answers.insert(question.name.clone(), value);
    }
    Ok(Value::Object(answers))
}

/// Builds the rendering context for a skeleton: the built-in questions first,
/// then the skeleton's own fields.
pub fn build_context(
    config: &SkeletonConfig,
    settings: &Settings,
    prompt: &dyn Prompter,
    preloaded: &Value,
) -> Result<Value> {
    let mut questions = default_questions(settings);
    questions.extend(config.fields.iter().map(Question::from_field));
    get_answers(prompt, &questions, preloaded)
}

/// Parses answers supplied as a JSON object. Blank input means no answers.
///
/// # Errors
/// * `Error::ConfigError` if the input is not a JSON object
pub fn parse_answers(content: &str) -> Result<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str::<Value>(content) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(Error::ConfigError("answers must be a JSON object".to_string())),
        Err(e) => Err(Error::ConfigError(format!("failed to parse answers as JSON: {e}"))),
    }
}

/// Reads preloaded answers from stdin when requested.
pub fn get_answers_from(take_from_stdin: bool) -> Result<Value> {
    if !take_from_stdin {
        return Ok(Value::Null);
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_answers(&buffer)
}
