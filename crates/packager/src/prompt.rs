use std::io::{self, BufRead, Write};

/// Source of interactive answers.
pub(crate) trait Prompt {
    /// Print `question` and block until a line of input is available.
    ///
    /// Returned answer has its line terminator removed.
    fn ask(&self, question: &str) -> io::Result<String>;
}

/// [`Prompt`] implementation backed by the process stdin.
pub(crate) struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;

        Ok(answer.trim_end_matches(['\r', '\n']).to_owned())
    }
}

/// Ask a yes/no question, where only `y` is treated as a confirmation.
pub(crate) fn confirm(prompt: &dyn Prompt, question: &str) -> io::Result<bool> {
    let answer = prompt.ask(question)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
