use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};

/// Line-oriented question/answer loop over any reader and writer.
///
/// `ask` keeps asking until the parser accepts the answer. It gives up
/// (returns `Ok(None)`) at end of input, or on an empty line the parser
/// would have rejected anyway.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and returns the raw answer without its line ending.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn ask<T, E, F>(&mut self, prompt: &str, parse: F) -> io::Result<Option<T>>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            let line = match self.read_line(prompt)? {
                Some(line) => line,
                None => return Ok(None),
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(_) if line.trim().is_empty() => return Ok(None),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
