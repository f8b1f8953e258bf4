/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which has titles and
/// pairs key-vector of values into HashMap<String, HashMap<String, Option<Vec<Value>>>>.
/// If some field listed in a template is not found in the document it will be field:None.
///
/// Numbers are kept together with their literal text, so a value like 0.1000000000000000000001
/// can be read later at any precision without a detour through f64.
/*
 code to parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which has titles and
 pairs key-vector of values. 1) user may define a template HashMap<String HashMap<String, Option<Vec<Value>> >>
 If some field i.e field_x not found in the resulting map it will be field_x:None 2) lines starting with //, #, % or ;
 are comments and are dropped before parsing
*/
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Option<Vec<Value>>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    /// decimal number, stored as written
    Decimal(String),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    // Helper functions to access different value types
    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// literal text of a number (integers included)
    pub fn as_decimal_string(&self) -> Option<String> {
        match self {
            Value::Decimal(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    // Try to convert to string representation
    pub fn to_string_value(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Decimal(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

/// Parses a title (word characters without spaces)
pub fn parse_title(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    let (input, result) = parser.parse(input)?;
    // Ignore trailing whitespace and newline characters
    let input = input.trim();
    Ok((input, result))
}

/// Parses a key (word characters without spaces)
pub fn parse_key(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

pub fn parse_value(input: &str) -> IResult<&str, Value> {
    // Parse a single value - excluding commas, whitespace, newlines, and semicolons
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        let s = s.trim();
        // Try parsing as different types in order
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if s.parse::<f64>().is_ok() && !s.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
            // "inf"/"NaN" parse as f64 but are left as text
            Ok(Value::Decimal(s.to_string()))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    });
    value_parser.parse(input)
}

pub fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = space0(input)?;
    // delimited drops the spaces around each comma
    let separator_coma = delimited(space0, tag(","), space0);
    let mut value_parser = separated_list0(separator_coma, parse_value);
    value_parser.parse(input)
}

/// Parses a key-value pair where value is a list
pub fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim(), result))
}

/// Parses a section with a title and multiple key-value pairs
pub fn parse_section(input: &str) -> IResult<&str, (String, HashMap<String, Vec<Value>>)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    // both spaces and newlines may follow the title
    let (input, _) = multispace0(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, space0));
    let (input, pairs) = parser.parse(input)?;

    let mut section_map = HashMap::new();
    for (key, values) in pairs {
        section_map.insert(key, values);
    }
    Ok((input, (title, section_map)))
}

/// Filters out comment lines (starting with //, #, %, or ;)
pub fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire (comment free) document into a HashMap
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (input, sections) = parser.parse(input)?;

    let mut result = HashMap::new();
    for (title, section_map) in sections.into_iter() {
        let mut title_map = HashMap::new();
        for (key, values) in section_map {
            title_map.insert(key, Some(values));
        }
        result.insert(title, title_map);
    }
    Ok((input, result))
}

/// Filters comments, parses the whole input and fails on leftovers
pub fn parse_document_as(input: &str, template: Option<&DocumentMap>) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    let mut parsed = match parse_document(&filtered) {
        Ok((remaining, parsed)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            parsed
        }
        Err(e) => return Err(format!("Parsing error: {:?}", e)),
    };
    // Ensure all expected titles and keys exist
    if let Some(template) = template {
        for (title, keys_map) in template {
            let section_map = parsed.entry(title.clone()).or_default();
            for key in keys_map.keys() {
                section_map.entry(key.clone()).or_insert(None);
            }
        }
    }
    Ok(parsed)
}

/// Stateful wrapper: input text, optional template, aliases of section titles and keys,
/// and the outcome of the last parse.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    input: String,
    template: Option<DocumentMap>,
    header_pseudonims: HashMap<String, Vec<String>>,
    field_pseudonims: HashMap<String, Vec<String>>,
    result: Option<DocumentMap>,
    error: Option<String>,
}

impl DocumentParser {
    pub fn new(input: String) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    pub fn with_template(mut self, template: DocumentMap) -> Self {
        self.template = Some(template);
        self
    }

    /// real name -> list of accepted aliases, for section titles and for keys
    pub fn with_pseudonims(
        &mut self,
        header_pseudonims: Option<HashMap<String, Vec<String>>>,
        field_pseudonims: Option<HashMap<String, Vec<String>>>,
    ) {
        if let Some(h) = header_pseudonims {
            self.header_pseudonims = h;
        }
        if let Some(f) = field_pseudonims {
            self.field_pseudonims = f;
        }
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
        self.reset();
    }

    pub fn setting_from_file(&mut self, path: PathBuf) -> Result<(), String> {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("cannot read task file {:?}: {}", path, e))?;
        self.set_input(content);
        Ok(())
    }

    /// Parses the input; titles and keys are lower-cased and aliases replaced by real names.
    pub fn parse_document(&mut self) -> Result<DocumentMap, String> {
        self.reset();
        match parse_document_as(&self.input, None) {
            Ok(parsed) => {
                let mut normalized = self.normalize(parsed);
                if let Some(template) = &self.template {
                    for (title, keys_map) in template {
                        let section_map = normalized.entry(title.clone()).or_default();
                        for key in keys_map.keys() {
                            section_map.entry(key.clone()).or_insert(None);
                        }
                    }
                }
                self.result = Some(normalized.clone());
                Ok(normalized)
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn real_name(pseudonims: &HashMap<String, Vec<String>>, name: String) -> String {
        pseudonims
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| a == &name))
            .map(|(real, _)| real.clone())
            .unwrap_or(name)
    }

    fn normalize(&self, parsed: DocumentMap) -> DocumentMap {
        let mut normalized: DocumentMap = HashMap::new();
        for (title, section) in parsed {
            let title = Self::real_name(&self.header_pseudonims, title.to_lowercase());
            let section_map: &mut SectionMap = normalized.entry(title).or_default();
            for (key, values) in section {
                let key = Self::real_name(&self.field_pseudonims, key.to_lowercase());
                section_map.insert(key, values);
            }
        }
        normalized
    }

    pub fn get_result(&self) -> Option<&DocumentMap> {
        self.result.as_ref()
    }

    pub fn get_error(&self) -> Option<&String> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    pub fn reset(&mut self) {
        self.result = None;
        self.error = None;
    }
}
