// src/prompt.rs
// =============================================================================
// Interactive questions asked when the command line leaves something out.
//
// Every function takes its input and output as parameters instead of using
// stdin/stdout directly, so tests can feed answers from a byte slice.
// End of input is an error rather than an endless re-prompt.
// =============================================================================

use std::io::{self, BufRead, Write};

use crate::filter::ContentCategory;

// The fallback menu shown when neither filter was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Extension,
    ContentType,
    Quit,
}

const MENU: &str = "\nWhat type of content do you want to download?\n\
\n 1. Files with a specific file extension.\
\n 2. All files of a specific content-type.\
\n 3. None, Quit.\
\n\n (Choose a menu option)";

/// Asks `question` until a non-empty answer is given
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    loop {
        write!(output, "{}: ", question)?;
        output.flush()?;

        let answer = read_answer(input)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

/// Asks a yes/no question. Anything other than y/yes counts as no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{} [y/N]: ", question)?;
    output.flush()?;

    let answer = read_answer(input)?.to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

pub fn menu<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<MenuChoice> {
    loop {
        match ask(input, output, MENU)?.as_str() {
            "1" => return Ok(MenuChoice::Extension),
            "2" => return Ok(MenuChoice::ContentType),
            "3" => return Ok(MenuChoice::Quit),
            other => writeln!(output, "Error: '{}' is not a valid choice.", other)?,
        }
    }
}

/// Asks for a content-type category, re-prompting on unknown names
pub fn ask_category<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<ContentCategory> {
    let names: Vec<&str> = ContentCategory::ALL
        .iter()
        .map(|c| c.display_name())
        .collect();
    let question = format!(
        "\nEnter the MIME Content-Type you wish to download ({})",
        names.join(", ")
    );

    loop {
        let answer = ask(input, output, &question)?;
        match answer.parse::<ContentCategory>() {
            Ok(category) => return Ok(category),
            Err(err) => writeln!(output, "Error: {}", err)?,
        }
    }
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        ));
    }
    Ok(line.trim().to_string())
}
