//! Choosing one unit when discovery finds several.

use std::io::{BufRead, Write};

use odoo_tuner_core::CollectionError;

/// Reduce discovered candidates to one service.
///
/// A single candidate is used as is. Several candidates prompt the operator
/// unless `interactive` is false, in which case they are an error.
pub fn pick_service<R: BufRead, W: Write>(
    candidates: Vec<String>,
    interactive: bool,
    input: R,
    output: W,
) -> Result<String, CollectionError> {
    match candidates.len() {
        0 => Err(CollectionError::SelectionAborted),
        1 => Ok(candidates.into_iter().next().unwrap_or_default()),
        _ if !interactive => Err(CollectionError::AmbiguousService { candidates }),
        _ => choose_service(&candidates, input, output),
    }
}

/// Print a numbered list and read choices until one is valid.
pub fn choose_service<R: BufRead, W: Write>(
    candidates: &[String],
    mut input: R,
    mut output: W,
) -> Result<String, CollectionError> {
    writeln!(output, "Multiple services detected:")?;
    for (idx, service) in candidates.iter().enumerate() {
        writeln!(output, "  {}. {}", idx + 1, service)?;
    }

    let mut line = String::new();
    loop {
        write!(output, "Select service [1-{}]: ", candidates.len())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(CollectionError::SelectionAborted);
        }

        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=candidates.len()).contains(&choice) => {
                return Ok(candidates[choice - 1].clone());
            }
            Ok(_) => writeln!(output, "Invalid selection.")?,
            Err(_) => writeln!(output, "Enter a number.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> Vec<String> {
        vec!["odoo.service".to_string(), "odoo-staging.service".to_string()]
    }

    #[test]
    fn test_single_candidate_skips_prompt() {
        let mut out = Vec::new();
        let picked = pick_service(vec!["odoo.service".into()], true, &b""[..], &mut out).unwrap();
        assert_eq!(picked, "odoo.service");
        assert!(out.is_empty());
    }

    #[test]
    fn test_reprompts_until_valid() {
        let mut out = Vec::new();
        let picked = choose_service(&units(), &b"abc\n7\n2\n"[..], &mut out).unwrap();
        assert_eq!(picked, "odoo-staging.service");

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("  1. odoo.service"));
        assert!(transcript.contains("Enter a number."));
        assert!(transcript.contains("Invalid selection."));
        assert_eq!(transcript.matches("Select service [1-2]: ").count(), 3);
    }

    #[test]
    fn test_zero_is_invalid() {
        let picked = choose_service(&units(), &b"0\n1\n"[..], Vec::new()).unwrap();
        assert_eq!(picked, "odoo.service");
    }

    #[test]
    fn test_end_of_input_aborts() {
        let err = choose_service(&units(), &b"x\n"[..], Vec::new()).unwrap_err();
        assert!(matches!(err, CollectionError::SelectionAborted));
    }

    #[test]
    fn test_non_interactive_ambiguity() {
        let err = pick_service(units(), false, &b"1\n"[..], Vec::new()).unwrap_err();
        match err {
            CollectionError::AmbiguousService { candidates } => assert_eq!(candidates, units()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
