//! Deck fixtures.

use std::fs;
use std::path::Path;

/// Two math items sharing a group and one Spanish item alone in its group.
pub const BASICS_YAML: &str = r#"list:
  - question: "2+2?"
    answer: 4
    group: math
  - question: "3+3?"
    answer: 6
    group: math
  - question: "cat?"
    answer: gato
    group: es
"#;

pub const CAPITALS_MD: &str = "\
G: capitals
Q: Capital of France?
A: Paris

Q: Capital of Spain?
A: Madrid

Q: Capital of Italy?
A: Rome

Q: Capital of Germany?
A: Berlin

Q: Capital of Portugal?
A: Lisbon
";

/// A four-item group next to a group with a single item.
pub const MIXED_MD: &str = "\
G: capitals
Q: Capital of France?
A: Paris

Q: Capital of Spain?
A: Madrid

Q: Capital of Italy?
A: Rome

Q: Capital of Germany?
A: Berlin

G: lone
Q: cat?
A: gato
";

pub fn install_decks(dir: &Path) {
    fs::write(dir.join("basics.yml"), BASICS_YAML).expect("Failed to write deck");
    fs::write(dir.join("capitals.md"), CAPITALS_MD).expect("Failed to write deck");
    fs::write(dir.join("mixed.md"), MIXED_MD).expect("Failed to write deck");
    fs::write(dir.join("empty.yml"), "list: []\n").expect("Failed to write deck");
    fs::write(dir.join("README.txt"), "not a deck").expect("Failed to write file");
}

/// Correct answer for a fixture question.
pub fn answer_for(question: &str) -> &'static str {
    match question {
        "2+2?" => "4",
        "3+3?" => "6",
        "cat?" => "gato",
        "Capital of France?" => "Paris",
        "Capital of Spain?" => "Madrid",
        "Capital of Italy?" => "Rome",
        "Capital of Germany?" => "Berlin",
        "Capital of Portugal?" => "Lisbon",
        other => panic!("unknown fixture question: {}", other),
    }
}
