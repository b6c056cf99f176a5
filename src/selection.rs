//! Interactive organization selection
//!
//! Organizations are listed by index; the operator types an index and is
//! asked again until it names a listed organization.

use console::style;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::error::AuditError;
use crate::types::Organization;

const PROMPT: &str = "Kindly select the organization # you would like to query: ";

/// Parse operator input as an index into a list of `count` organizations.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, AuditError> {
    let trimmed = input.trim();
    let index: usize = trimmed
        .parse()
        .map_err(|_| AuditError::InvalidSelection(format!("'{trimmed}' is not a number")))?;
    if index < count {
        Ok(index)
    } else {
        Err(AuditError::InvalidSelection(format!(
            "{index} is out of range (0-{})",
            count.saturating_sub(1)
        )))
    }
}

/// Prompt on `output` until `input` yields a valid index, then return the
/// chosen organization's id.
///
/// Invalid entries are reported and re-prompted; only running out of input
/// or an empty organization list ends the loop with an error.
pub fn select_organization<R, W>(
    organizations: &[Organization],
    mut input: R,
    mut output: W,
) -> Result<String, AuditError>
where
    R: BufRead,
    W: Write,
{
    if organizations.is_empty() {
        return Err(AuditError::InvalidSelection(
            "no organizations are visible to this API key".to_string(),
        ));
    }

    let mut line = String::new();
    loop {
        write!(output, "\n{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(AuditError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before an organization was selected",
            )));
        }

        match parse_selection(&line, organizations.len()) {
            Ok(index) => {
                let org = &organizations[index];
                debug!(org_id = %org.id, org = %org.name, "Organization selected");
                return Ok(org.id.clone());
            }
            Err(e) => {
                debug!(error = %e, "Rejected organization selection");
                writeln!(output, "\t{}", style("Invalid Organization Number").red().bold())?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn orgs() -> Vec<Organization> {
        vec![
            Organization {
                id: "O_100".to_string(),
                name: "Acme".to_string(),
            },
            Organization {
                id: "O_200".to_string(),
                name: "Globex".to_string(),
            },
        ]
    }

    #[test]
    fn test_parse_selection_in_range() {
        assert_eq!(parse_selection("1\n", 2).unwrap(), 1);
        assert_eq!(parse_selection(" 0 ", 2).unwrap(), 0);
    }

    #[test]
    fn test_parse_selection_rejects_out_of_range_and_garbage() {
        assert!(matches!(parse_selection("2", 2), Err(AuditError::InvalidSelection(_))));
        assert!(matches!(parse_selection("-1", 2), Err(AuditError::InvalidSelection(_))));
        assert!(matches!(parse_selection("abc", 2), Err(AuditError::InvalidSelection(_))));
        assert!(matches!(parse_selection("", 2), Err(AuditError::InvalidSelection(_))));
    }

    #[test]
    fn test_select_reprompts_until_valid() {
        let input = Cursor::new("7\nfoo\n1\n");
        let mut output = Vec::new();
        let id = select_organization(&orgs(), input, &mut output).unwrap();

        assert_eq!(id, "O_200");
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid Organization Number").count(), 2);
        assert_eq!(text.matches(PROMPT).count(), 3);
    }

    #[test]
    fn test_select_eof_is_io_error() {
        let input = Cursor::new("9\n");
        let err = select_organization(&orgs(), input, Vec::new()).unwrap_err();
        assert!(matches!(err, AuditError::Io(ref e) if e.kind() == std::io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_select_with_no_organizations() {
        let err = select_organization(&[], Cursor::new("0\n"), Vec::new()).unwrap_err();
        assert!(matches!(err, AuditError::InvalidSelection(_)));
    }
}
