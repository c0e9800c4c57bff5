//! Interactive operator prompts.
//!
//! Generic over the reader and writer so the flow can be scripted in tests.
//! End of input at any prompt is treated as the operator cancelling.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::core::rename::ProjectName;
use crate::core::types::FeatureSelection;

/// Result of the interactive flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Selected(FeatureSelection),
    Cancelled,
}

/// Ask for the project name and the feature toggles.
///
/// The "starter template files" question covers both demo pages and
/// analytics. A name equal to `current_name` means no rename.
pub fn prompt_selection<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    current_name: &str,
) -> Result<PromptOutcome> {
    writeln!(writer, "\n  Project Cleanup\n")?;

    let Some(name) = prompt_project_name(reader, writer, current_name)? else {
        return Ok(PromptOutcome::Cancelled);
    };
    let Some(remove_template) = prompt_yes_no(
        reader,
        writer,
        "Remove starter template files? (demo pages, analytics)",
    )?
    else {
        return Ok(PromptOutcome::Cancelled);
    };
    let Some(remove_releases) = prompt_yes_no(
        reader,
        writer,
        "Remove automatic releases? (GitHub release workflow)",
    )?
    else {
        return Ok(PromptOutcome::Cancelled);
    };
    let Some(remove_e2e) =
        prompt_yes_no(reader, writer, "Remove e2e tests? (Playwright, CI e2e jobs)")?
    else {
        return Ok(PromptOutcome::Cancelled);
    };

    let selection = FeatureSelection {
        remove_demo_pages: remove_template,
        remove_analytics: remove_template,
        remove_releases,
        remove_e2e,
        rename_to: Some(name),
    };
    Ok(PromptOutcome::Selected(
        selection.without_noop_rename(current_name),
    ))
}

fn prompt_project_name<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    current_name: &str,
) -> Result<Option<ProjectName>> {
    loop {
        write!(writer, "  What is your project name? [{current_name}]: ")?;
        writer.flush()?;
        let Some(input) = read_line(reader)? else {
            return Ok(None);
        };
        let raw = if input.is_empty() {
            current_name
        } else {
            input.as_str()
        };
        match ProjectName::parse(raw) {
            Ok(name) => return Ok(Some(name)),
            Err(err) => writeln!(writer, "    {err}")?,
        }
    }
}

fn prompt_yes_no<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<Option<bool>> {
    loop {
        write!(writer, "  {question} [y/N]: ")?;
        writer.flush()?;
        let Some(input) = read_line(reader)? else {
            return Ok(None);
        };
        match input.to_ascii_lowercase().as_str() {
            "" | "n" | "no" => return Ok(Some(false)),
            "y" | "yes" => return Ok(Some(true)),
            _ => writeln!(writer, "    Please answer y or n.")?,
        }
    }
}

/// Read one trimmed line; `None` at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line).context("read operator input")?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, current: &str) -> (PromptOutcome, String) {
        let mut reader = input.as_bytes();
        let mut out = Vec::new();
        let outcome = prompt_selection(&mut reader, &mut out, current).expect("prompt");
        (outcome, String::from_utf8(out).expect("utf8"))
    }

    fn selected(outcome: PromptOutcome) -> FeatureSelection {
        match outcome {
            PromptOutcome::Selected(selection) => selection,
            PromptOutcome::Cancelled => panic!("unexpected cancel"),
        }
    }

    #[test]
    fn defaults_keep_everything() {
        let (outcome, _) = run("\n\n\n\n", "my-app");
        let selection = selected(outcome);
        assert!(selection.is_empty());
    }

    #[test]
    fn template_question_covers_demo_pages_and_analytics() {
        let (outcome, _) = run("acme\ny\nn\nyes\n", "my-app");
        let selection = selected(outcome);
        assert!(selection.remove_demo_pages);
        assert!(selection.remove_analytics);
        assert!(!selection.remove_releases);
        assert!(selection.remove_e2e);
        assert_eq!(
            selection.rename_to.as_ref().map(ProjectName::as_str),
            Some("acme")
        );
    }

    #[test]
    fn invalid_name_is_reprompted() {
        let (outcome, transcript) = run("Bad_Name\ngood-name\nn\nn\nn\n", "my-app");
        let selection = selected(outcome);
        assert_eq!(
            selection.rename_to.as_ref().map(ProjectName::as_str),
            Some("good-name")
        );
        assert!(transcript.contains("lowercase alphanumeric"));
        assert_eq!(transcript.matches("What is your project name?").count(), 2);
    }

    #[test]
    fn unclear_answer_is_reprompted() {
        let (outcome, transcript) = run("\nmaybe\ny\nn\nn\n", "my-app");
        assert!(selected(outcome).remove_demo_pages);
        assert!(transcript.contains("Please answer y or n."));
    }

    #[test]
    fn end_of_input_cancels() {
        let (outcome, _) = run("acme\ny\n", "my-app");
        assert_eq!(outcome, PromptOutcome::Cancelled);

        let (outcome, _) = run("", "my-app");
        assert_eq!(outcome, PromptOutcome::Cancelled);
    }
}
