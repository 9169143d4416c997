//! Deck import from YAML and markdown files.
//!
//! # YAML
//! ```yaml
//! list:
//!   - question: "2+2?"
//!     answer: 4
//!     group: math
//! ```
//!
//! # Markdown
//! ```markdown
//! G: math
//! Q: 2+2?
//! A: 4
//!
//! Q: 3+3?
//! A: 6
//! ```
//!
//! `G:` applies to every following card until the next `G:` line.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::ParseError;
use crate::types::{Deck, Item};

type Result<T> = std::result::Result<T, ParseError>;

/// Load a deck file, choosing the format from its extension.
pub fn load_deck(path: &Path) -> Result<Deck> {
    let format = DeckFormat::from_path(path)
        .ok_or_else(|| ParseError::UnsupportedFormat(path.display().to_string()))?;
    let content = std::fs::read_to_string(path)?;
    match format {
        DeckFormat::Yaml => parse_yaml(&content),
        DeckFormat::Markdown => parse_markdown(&content),
    }
}

/// Whether `path` has an extension `load_deck` understands.
pub fn is_deck_file(path: &Path) -> bool {
    DeckFormat::from_path(path).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DeckFormat {
    Yaml,
    Markdown,
}

impl DeckFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yml" | "yaml" => Some(Self::Yaml),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct YamlDeck {
    #[serde(default)]
    list: Vec<YamlItem>,
}

#[derive(Deserialize)]
struct YamlItem {
    question: Value,
    answer: Value,
    group: Value,
}

/// Parse a YAML deck with a top-level `list` of items.
pub fn parse_yaml(content: &str) -> Result<Deck> {
    if content.trim().is_empty() {
        return Deck::new(vec![]);
    }

    let raw: YamlDeck = serde_yaml::from_str(content)?;
    let items = raw
        .list
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let position = idx + 1;
            Ok(Item {
                question: scalar_text(item.question, "question", position)?,
                answer: scalar_text(item.answer, "answer", position)?,
                group: scalar_text(item.group, "group", position)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Deck::new(items)
}

/// Numbers and booleans are common as answers, so any scalar is accepted.
fn scalar_text(value: Value, field: &'static str, position: usize) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ParseError::InvalidField { field, position }),
    }
}

/// Parse markdown cards into a deck.
pub fn parse_markdown(content: &str) -> Result<Deck> {
    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        parser.process_line(line, line_num)?;
    }

    Deck::new(parser.finalize()?)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Question,
    Answer,
}

struct CardBuilder {
    group: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    start_line: usize,
}

impl CardBuilder {
    fn new(start_line: usize, group: Option<String>) -> Self {
        Self {
            group,
            question: None,
            answer: None,
            start_line,
        }
    }

    fn build(self) -> Result<Item> {
        let question = self.question.ok_or(ParseError::MissingQuestion {
            line: self.start_line,
        })?;
        let answer = self.answer.ok_or(ParseError::MissingAnswer {
            line: self.start_line,
        })?;
        let group = self.group.ok_or(ParseError::MissingGroup {
            line: self.start_line,
        })?;

        Ok(Item {
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
            group,
        })
    }
}

struct Parser {
    group: Option<String>,
    current: Option<CardBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
    items: Vec<Item>,
}

impl Parser {
    fn new() -> Self {
        Self {
            group: None,
            current: None,
            current_field: None,
            buffer: Vec::new(),
            items: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Group(name) => self.handle_group(name)?,
            LineType::Question(text) => self.handle_question(text, line_num)?,
            LineType::Answer(text) => self.handle_answer(text, line_num)?,
            LineType::Text(text) => {
                if self.current_field.is_some() {
                    self.buffer.push(text.to_string());
                }
            }
            LineType::Empty => {
                if self.current_field.is_some() {
                    self.buffer.push(String::new());
                }
            }
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("G:") {
            LineType::Group(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Question(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Answer(rest.trim())
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(line)
        }
    }

    fn handle_group(&mut self, name: &str) -> Result<()> {
        self.finish_card()?;
        self.group = Some(name.to_string()).filter(|g| !g.is_empty());
        Ok(())
    }

    fn handle_question(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.finish_card()?;
        self.current = Some(CardBuilder::new(line_num, self.group.clone()));
        self.current_field = Some(Field::Question);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_answer(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();
        if self.current.is_none() {
            return Err(ParseError::MissingQuestion { line: line_num });
        }
        self.current_field = Some(Field::Answer);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let Some(ref mut card) = self.current {
            match self.current_field {
                Some(Field::Question) => card.question = Some(content),
                Some(Field::Answer) => card.answer = Some(content),
                None => {}
            }
        }
    }

    fn finish_card(&mut self) -> Result<()> {
        self.flush_buffer();
        self.current_field = None;
        if let Some(card) = self.current.take() {
            self.items.push(card.build()?);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<Item>> {
        self.finish_card()?;
        Ok(self.items)
    }
}

enum LineType<'a> {
    Group(&'a str),
    Question(&'a str),
    Answer(&'a str),
    Text(&'a str),
    Empty,
}
