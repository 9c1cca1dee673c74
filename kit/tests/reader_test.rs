//! Tests for the line reader front end over in-memory sources.

use linekit::{Error, LineReader, ParseWith, ReadConfig};

fn reader(input: &str) -> LineReader<&[u8]> {
    LineReader::new(input.as_bytes())
}

#[test]
fn test_single_value_per_line() {
    let mut input = reader("100\n-7\n");
    assert_eq!(input.value::<i32>().unwrap(), 100);
    assert_eq!(input.value::<i32>().unwrap(), -7);
}

#[test]
fn test_line_without_terminator() {
    let mut input = reader("42");
    assert_eq!(input.value::<i32>().unwrap(), 42);
}

#[test]
fn test_crlf_terminator_is_stripped() {
    let mut input = reader("1 2\r\n3 4\r\n");
    assert_eq!(input.array::<i32, 2>().unwrap(), [1, 2]);
    assert_eq!(input.array::<i32, 2>().unwrap(), [3, 4]);
}

#[test]
fn test_end_of_input() {
    let mut input = reader("1\n");
    input.value::<i32>().unwrap();
    assert!(matches!(input.value::<i32>().unwrap_err(), Error::EndOfInput));
}

#[test]
fn test_end_of_input_on_empty_source() {
    assert!(matches!(reader("").value::<i32>().unwrap_err(), Error::EndOfInput));
}

#[test]
fn test_empty_line_is_a_line() {
    // A bare newline is an empty line, not end of input.
    let mut input = reader("\n5\n");
    let first = input.line::<i32>().unwrap();
    assert!(first.is_empty());
    assert_eq!(input.value::<i32>().unwrap(), 5);
}

#[test]
fn test_buffer_reuse_does_not_leak_previous_line() {
    let mut input = reader("1 2 3\n45\n");
    assert_eq!(input.to_vec::<i32>().unwrap(), [1, 2, 3]);
    assert_eq!(input.to_vec::<i32>().unwrap(), [45]);
}

#[test]
fn test_mixed_access_patterns() {
    let mut input = reader("3\n10 20 30\nname score\n");
    let n: usize = input.value().unwrap();
    assert_eq!(n, 3);
    let values: Vec<i64> = input.to_vec().unwrap();
    assert_eq!(values, [10, 20, 30]);
    let [a, b] = input.array::<String, 2>().unwrap();
    assert_eq!((a.as_str(), b.as_str()), ("name", "score"));
}

#[test]
fn test_line_with_custom_separator() {
    let mut input = reader("1,2,3\n");
    let config = ReadConfig::new().with_separator(b',');
    let values = input.line_with::<i32>(config).unwrap().into_vec().unwrap();
    assert_eq!(values, [1, 2, 3]);
}

#[test]
fn test_reader_level_default_separator() {
    let config = ReadConfig::new().with_separator(b';');
    let mut input = LineReader::with_config("4;5;6\n".as_bytes(), config);
    assert_eq!(input.to_vec::<i32>().unwrap(), [4, 5, 6]);
}

#[test]
fn test_line_using_strategy() {
    fn from_hex(tok: &str) -> Result<u32, Box<dyn std::error::Error + Send + Sync>> {
        Ok(u32::from_str_radix(tok, 16)?)
    }
    let mut input = reader("ff 7f\n");
    let mut tokens = input
        .line_using(ParseWith(from_hex), ReadConfig::DEFAULT)
        .unwrap();
    assert_eq!(tokens.value().unwrap(), 255);
    assert_eq!(tokens.value().unwrap(), 127);
}

#[test]
fn test_cursor_borrow_ends_at_next_line() {
    let mut input = reader("a b\nc d\n");
    let first: Vec<String> = input.line::<String>().unwrap().into_vec().unwrap();
    let second: Vec<String> = input.line::<String>().unwrap().into_vec().unwrap();
    assert_eq!(first, ["a", "b"]);
    assert_eq!(second, ["c", "d"]);
}
