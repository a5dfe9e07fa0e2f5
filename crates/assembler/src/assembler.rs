//! Multi-line program assembly.

use crate::encoder::encode;
use crate::errors::AssembleError;

/// Assembles one instruction per line into program words.
///
/// Text after `#` is a comment. Lines that are blank once comments are
/// stripped produce no word.
///
/// # Errors
///
/// Returns the 1-indexed line number and encode error of the first line that
/// fails to encode.
pub fn assemble_program(source: &str) -> Result<Vec<u32>, AssembleError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let code = line.split_once('#').map_or(line, |(code, _)| code);
            (!code.trim().is_empty()).then_some((index + 1, code))
        })
        .map(|(line, code)| encode(code).map_err(|error| AssembleError { line, error }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::assemble_program;
    use crate::errors::{EncodeError, EncodeErrorKind};

    #[test]
    fn skips_blank_lines_and_comments() {
        let source = "\
# exit immediately
ori $v0, $zero, 10   # service 10

syscall
";
        assert_eq!(assemble_program(source), Ok(vec![0x3402_000a, 0x0000_000c]));
    }

    #[test]
    fn empty_source_assembles_to_nothing() {
        assert_eq!(assemble_program(""), Ok(Vec::new()));
        assert_eq!(assemble_program("   \n# only a comment\n"), Ok(Vec::new()));
    }

    #[test]
    fn reports_first_failing_line() {
        let source = "ori $v0 $zero 10\n\nadd $t0 $t1 $q1\nfrob\n";
        let error = assemble_program(source).expect_err("line 3 is invalid");
        assert_eq!(error.line, 3);
        assert_eq!(
            error.error,
            EncodeError::new(EncodeErrorKind::UnknownRegister("$q1".to_owned()))
        );
        assert_eq!(error.to_string(), "line 3: unknown register `$q1`");
    }
}
