// Spelled-out amounts ("twelve thousand", "five hundred") as they appear in the
// opportunity exports.

/// Turns a natural-language number phrase into a number, if it is one.
pub trait NumberPhraseParser: Send + Sync {
    fn locale(&self) -> &str;
    fn parse_phrase(&self, phrase: &str) -> Option<f64>;
}

/// Words that mean zero. The Spanish form shows up in the exports next to
/// English phrases.
const ZERO_WORDS: &[&str] = &["zero", "cero"];

const DIGIT_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Word {
    Unit(u64),
    Teen(u64),
    Ten(u64),
    Hundred,
    Scale(u64),
    Article,
}

// Position inside the current scale group, used to reject phrases such as
// "five five" or "twenty hundred".
#[derive(Debug, Clone, Copy, PartialEq)]
enum Last {
    Start,
    Unit,
    Teen,
    Ten,
    Hundred,
}

fn classify(token: &str) -> Option<Word> {
    let word = match token {
        "a" => Word::Article,
        "one" => Word::Unit(1),
        "two" => Word::Unit(2),
        "three" => Word::Unit(3),
        "four" => Word::Unit(4),
        "five" => Word::Unit(5),
        "six" => Word::Unit(6),
        "seven" => Word::Unit(7),
        "eight" => Word::Unit(8),
        "nine" => Word::Unit(9),
        "ten" => Word::Teen(10),
        "eleven" => Word::Teen(11),
        "twelve" => Word::Teen(12),
        "thirteen" => Word::Teen(13),
        "fourteen" => Word::Teen(14),
        "fifteen" => Word::Teen(15),
        "sixteen" => Word::Teen(16),
        "seventeen" => Word::Teen(17),
        "eighteen" => Word::Teen(18),
        "nineteen" => Word::Teen(19),
        "twenty" => Word::Ten(20),
        "thirty" => Word::Ten(30),
        "forty" => Word::Ten(40),
        "fifty" => Word::Ten(50),
        "sixty" => Word::Ten(60),
        "seventy" => Word::Ten(70),
        "eighty" => Word::Ten(80),
        "ninety" => Word::Ten(90),
        "hundred" => Word::Hundred,
        "thousand" => Word::Scale(1_000),
        "million" => Word::Scale(1_000_000),
        "billion" => Word::Scale(1_000_000_000),
        _ => return None,
    };
    Some(word)
}

/// American-English number words.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishNumberWords;

impl EnglishNumberWords {
    pub fn new() -> Self {
        Self
    }

    fn parse_integer(tokens: &[&str]) -> Option<u64> {
        let mut total: u64 = 0;
        let mut group: u64 = 0;
        let mut last = Last::Start;
        let mut last_scale: Option<u64> = None;

        for token in tokens {
            match classify(token)? {
                Word::Article => {
                    if last != Last::Start {
                        return None;
                    }
                    group = 1;
                    last = Last::Unit;
                }
                Word::Unit(n) => {
                    if !matches!(last, Last::Start | Last::Ten | Last::Hundred) {
                        return None;
                    }
                    group += n;
                    last = Last::Unit;
                }
                Word::Teen(n) => {
                    if !matches!(last, Last::Start | Last::Hundred) {
                        return None;
                    }
                    group += n;
                    last = Last::Teen;
                }
                Word::Ten(n) => {
                    if !matches!(last, Last::Start | Last::Hundred) {
                        return None;
                    }
                    group += n;
                    last = Last::Ten;
                }
                Word::Hundred => {
                    group = match last {
                        Last::Start if total == 0 && last_scale.is_none() => 100,
                        Last::Unit | Last::Teen if group < 100 => group * 100,
                        _ => return None,
                    };
                    last = Last::Hundred;
                }
                Word::Scale(scale) => {
                    if last_scale.map_or(false, |prev| scale >= prev) {
                        return None;
                    }
                    let multiplier = match last {
                        // A bare scale ("thousand") only makes sense as the first word.
                        Last::Start if last_scale.is_none() => 1,
                        Last::Start => return None,
                        _ => group,
                    };
                    total = total.checked_add(multiplier.checked_mul(scale)?)?;
                    group = 0;
                    last = Last::Start;
                    last_scale = Some(scale);
                }
            }
        }

        total.checked_add(group)
    }

    fn parse_fraction(tokens: &[&str]) -> Option<f64> {
        if tokens.is_empty() {
            return None;
        }
        let mut digits = String::from("0.");
        for token in tokens {
            let digit = DIGIT_WORDS.iter().position(|w| w == token)?;
            digits.push(char::from(b'0' + digit as u8));
        }
        digits.parse::<f64>().ok()
    }
}

impl NumberPhraseParser for EnglishNumberWords {
    fn locale(&self) -> &str {
        "en-US"
    }

    fn parse_phrase(&self, phrase: &str) -> Option<f64> {
        let normalized = phrase.trim().to_lowercase();
        if ZERO_WORDS.contains(&normalized.as_str()) {
            return Some(0.0);
        }

        let tokens: Vec<&str> = normalized
            .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
            .filter(|t| !t.is_empty() && *t != "and")
            .collect();
        if tokens.is_empty() {
            return None;
        }

        match tokens.iter().position(|t| *t == "point") {
            Some(at) => {
                let whole = if at == 0 || (at == 1 && ZERO_WORDS.contains(&tokens[0])) {
                    0
                } else {
                    Self::parse_integer(&tokens[..at])?
                };
                let fraction = Self::parse_fraction(&tokens[at + 1..])?;
                Some(whole as f64 + fraction)
            }
            None => Self::parse_integer(&tokens).map(|n| n as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(phrase: &str) -> Option<f64> {
        EnglishNumberWords::new().parse_phrase(phrase)
    }

    #[test]
    fn test_zero_words() {
        assert_eq!(parse("cero"), Some(0.0));
        assert_eq!(parse(" CERO "), Some(0.0));
        assert_eq!(parse("zero"), Some(0.0));
    }

    #[test]
    fn test_simple_phrases() {
        assert_eq!(parse("five hundred"), Some(500.0));
        assert_eq!(parse("twelve thousand"), Some(12000.0));
        assert_eq!(parse("Seven"), Some(7.0));
        assert_eq!(parse("nineteen"), Some(19.0));
    }

    #[test]
    fn test_compound_phrases() {
        assert_eq!(parse("twenty-five"), Some(25.0));
        assert_eq!(parse("one hundred and five"), Some(105.0));
        assert_eq!(parse("two million three hundred thousand"), Some(2_300_000.0));
        assert_eq!(
            parse("one billion two hundred thirty four million five hundred sixty seven thousand eight hundred ninety"),
            Some(1_234_567_890.0)
        );
        assert_eq!(parse("fifty thousand, two hundred"), Some(50_200.0));
    }

    #[test]
    fn test_article_and_bare_scales() {
        assert_eq!(parse("a thousand"), Some(1000.0));
        assert_eq!(parse("a hundred"), Some(100.0));
        assert_eq!(parse("thousand"), Some(1000.0));
        assert_eq!(parse("hundred"), Some(100.0));
        assert_eq!(parse("twelve hundred"), Some(1200.0));
    }

    #[test]
    fn test_decimal_point() {
        assert_eq!(parse("two point five"), Some(2.5));
        assert_eq!(parse("point two five"), Some(0.25));
        assert_eq!(parse("zero point five"), Some(0.5));
        assert_eq!(parse("two point"), None);
        assert_eq!(parse("two point twelve"), None);
    }

    #[test]
    fn test_rejects_malformed_phrases() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("hello"), None);
        assert_eq!(parse("five hundred dollars"), None);
        assert_eq!(parse("five five"), None);
        assert_eq!(parse("twenty hundred"), None);
        assert_eq!(parse("one thousand two thousand"), None);
        assert_eq!(parse("one thousand one million"), None);
        assert_eq!(parse("one million thousand"), None);
        assert_eq!(parse("five hundred three hundred"), None);
        assert_eq!(parse("one zero"), None);
    }

    #[test]
    fn test_numerals_are_not_phrases() {
        assert_eq!(parse("500"), None);
        assert_eq!(parse("12.5"), None);
    }

    #[test]
    fn test_locale() {
        assert_eq!(EnglishNumberWords::new().locale(), "en-US");
    }
}
