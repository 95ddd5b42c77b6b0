use super::Stage;
use crate::parsing::coerce_number;
use crate::parsing::number_words::NumberPhraseParser;
use serde_json::Value;
use shared::models::{Table, Value as Cell};

/// Turns the amount column into numbers.
///
/// Text is first offered to the number-phrase parser; what it cannot read is
/// left untouched for the numeric coercion pass, which maps anything still
/// non-numeric to `Missing`.
pub struct ParseAmounts {
    column: String,
    parser: Box<dyn NumberPhraseParser>,
}

impl ParseAmounts {
    pub fn new(column: &str, parser: Box<dyn NumberPhraseParser>) -> Self {
        Self {
            column: column.to_string(),
            parser,
        }
    }

    fn parse_words(&self, value: &Cell) -> Cell {
        match value {
            Cell::Text(s) => match self.parser.parse_phrase(s) {
                Some(n) => Cell::Number(n),
                None => value.clone(),
            },
            other => other.clone(),
        }
    }
}

impl Stage for ParseAmounts {
    fn name(&self) -> &str {
        "parse_amounts"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "column": self.column, "locale": self.parser.locale() })
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.column.as_str()]
    }

    fn apply(&self, table: &mut Table) {
        let Some(index) = table.column_index(&self.column) else {
            return;
        };

        table.map_column(index, |value| self.parse_words(value));

        let mut degraded = 0usize;
        table.map_column(index, |value| match coerce_number(value) {
            Some(n) => Cell::Number(n),
            None => {
                if !value.is_missing() {
                    degraded += 1;
                    tracing::debug!(column = %self.column, value = %value, "Unparseable amount, marking as missing");
                }
                Cell::Missing
            }
        });
        if degraded > 0 {
            tracing::info!(column = %self.column, count = degraded, "Amounts that could not be parsed were set to missing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::number_words::EnglishNumberWords;
    use shared::models::Record;

    fn run(values: Vec<Cell>) -> Vec<Cell> {
        let mut table = Table::new(vec!["Amount".to_string()]);
        for v in values {
            table.push(Record::new(vec![v]));
        }
        ParseAmounts::new("Amount", Box::new(EnglishNumberWords::new())).apply(&mut table);
        table.records().iter().map(|r| r.get(0).clone()).collect()
    }

    #[test]
    fn test_mixed_representations() {
        let out = run(vec![
            Cell::Number(1500.0),
            "twelve thousand".into(),
            "five hundred".into(),
            " 750 ".into(),
            "cero".into(),
            Cell::Missing,
        ]);
        assert_eq!(
            out,
            vec![
                Cell::Number(1500.0),
                Cell::Number(12000.0),
                Cell::Number(500.0),
                Cell::Number(750.0),
                Cell::Number(0.0),
                Cell::Missing,
            ]
        );
    }

    #[test]
    fn test_garbage_becomes_missing() {
        let out = run(vec!["lots".into(), "12,000".into(), "N/D".into(), "".into()]);
        assert!(out.iter().all(Cell::is_missing));
    }

    #[test]
    fn test_parameters_name_locale() {
        let stage = ParseAmounts::new("Importe", Box::new(EnglishNumberWords::new()));
        let params = stage.parameters();
        assert_eq!(params["column"], "Importe");
        assert_eq!(params["locale"], "en-US");
    }
}
