use colored::Colorize;
use pbj::dialogue::{Dialogue, Step};
use pbj::error::Result;
use pbj::model::Bookmarks;
use std::io::{self, BufRead, Write};

/// Runs a dialogue on stdin/stderr until it finishes. Returns false if the
/// user aborted or stdin was closed.
pub(super) fn drive<D: Dialogue>(dialogue: &mut D, bookmarks: &Bookmarks) -> Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stderr = io::stderr();

    loop {
        write!(stderr, "{}", dialogue.prompt())?;
        stderr.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(stderr)?;
            return Ok(false);
        }

        match dialogue.step(bookmarks, &line) {
            Step::Continue => {}
            Step::List(choices) => {
                for choice in choices {
                    writeln!(stderr, "  {}", choice)?;
                }
            }
            Step::Invalid(reason) => writeln!(stderr, "{}", reason.yellow())?,
            Step::Done => return Ok(true),
            Step::Aborted => return Ok(false),
        }
    }
}
